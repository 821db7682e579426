//! Dense, index-based snapshot of a pedigree for the layout passes
//!
//! Index `i` is the node's position in insertion order, so index order is
//! the tie-break order everywhere in the engine.

use kinship_domain::{NodeId, PedigreeView, RelationshipType, Sex};
use std::collections::HashMap;

pub(crate) struct Frame {
    pub ids: Vec<NodeId>,
    pub sexes: Vec<Sex>,
    pub parents: Vec<Vec<usize>>,
    pub children: Vec<Vec<usize>>,
    /// Couple edges in insertion order
    pub couples: Vec<(usize, usize, RelationshipType)>,
}

impl Frame {
    pub fn build<V: PedigreeView + ?Sized>(view: &V) -> Self {
        let nodes = view.nodes();
        let index: HashMap<NodeId, usize> =
            nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
        let n = nodes.len();

        let mut frame = Frame {
            ids: nodes.iter().map(|n| n.id).collect(),
            sexes: nodes.iter().map(|n| n.sex).collect(),
            parents: vec![Vec::new(); n],
            children: vec![Vec::new(); n],
            couples: Vec::new(),
        };

        for edge in view.edges() {
            let (Some(&s), Some(&t)) = (index.get(&edge.source), index.get(&edge.target)) else {
                continue;
            };
            if s == t {
                continue;
            }
            match edge.relationship {
                RelationshipType::Parent => {
                    frame.parents[t].push(s);
                    frame.children[s].push(t);
                }
                kind => frame.couples.push((s, t, kind)),
            }
        }

        frame
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    fn mates_of(&self, i: usize, kind: RelationshipType) -> impl Iterator<Item = usize> + '_ {
        self.couples.iter().filter(move |c| c.2 == kind).filter_map(move |&(a, b, _)| {
            if a == i {
                Some(b)
            } else if b == i {
                Some(a)
            } else {
                None
            }
        })
    }

    /// Current partner first, then ex-partners, in edge order
    pub fn couple_candidates(&self, i: usize) -> Vec<usize> {
        self.mates_of(i, RelationshipType::Partner)
            .chain(self.mates_of(i, RelationshipType::ExPartner))
            .collect()
    }

    pub fn shared_children(&self, a: usize, b: usize) -> Vec<usize> {
        self.children[a]
            .iter()
            .copied()
            .filter(|c| self.children[b].contains(c))
            .collect()
    }

    /// Nodes sharing at least one parent with `i`, in index order
    pub fn siblings(&self, i: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self.parents[i]
            .iter()
            .flat_map(|&p| self.children[p].iter().copied())
            .filter(|&s| s != i)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}
