//! Trait definitions for reading a pedigree
//!
//! The store implements [`PedigreeView`]; the layout engine and the
//! inference rules only ever read through it. All family queries are
//! derived scans over `edges()`; pedigrees hold tens of nodes, so no
//! adjacency cache is kept.

use crate::{Edge, Node, NodeId, RelationshipType};

/// Read access to a pedigree graph
pub trait PedigreeView {
    /// All nodes, in insertion order
    fn nodes(&self) -> Vec<&Node>;

    /// All edges, in insertion order
    fn edges(&self) -> Vec<&Edge>;

    /// Look up a node by id
    fn node(&self, id: NodeId) -> Option<&Node>;

    /// The ego node, if one exists
    fn ego(&self) -> Option<&Node> {
        self.nodes().into_iter().find(|n| n.is_ego)
    }

    /// Parents of `id`, in edge insertion order
    fn parents(&self, id: NodeId) -> Vec<NodeId> {
        self.edges()
            .into_iter()
            .filter(|e| e.relationship == RelationshipType::Parent && e.target == id)
            .map(|e| e.source)
            .collect()
    }

    /// Children of `id`, in edge insertion order
    fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.edges()
            .into_iter()
            .filter(|e| e.relationship == RelationshipType::Parent && e.source == id)
            .map(|e| e.target)
            .collect()
    }

    /// Current partner of `id`
    fn partner(&self, id: NodeId) -> Option<NodeId> {
        self.couple_members(id, RelationshipType::Partner).into_iter().next()
    }

    /// First ex-partner of `id`
    fn ex_partner(&self, id: NodeId) -> Option<NodeId> {
        self.ex_partners(id).into_iter().next()
    }

    /// All ex-partners of `id`
    fn ex_partners(&self, id: NodeId) -> Vec<NodeId> {
        self.couple_members(id, RelationshipType::ExPartner)
    }

    /// Other members of every couple edge of the given kind touching `id`
    fn couple_members(&self, id: NodeId, kind: RelationshipType) -> Vec<NodeId> {
        self.edges()
            .into_iter()
            .filter(|e| e.relationship == kind)
            .filter_map(|e| e.other(id))
            .collect()
    }

    /// Children that `a` and `b` have together
    fn shared_children(&self, a: NodeId, b: NodeId) -> Vec<NodeId> {
        let of_b = self.children(b);
        self.children(a)
            .into_iter()
            .filter(|c| of_b.contains(c))
            .collect()
    }

    /// Every edge touching `id`
    fn incident_edges(&self, id: NodeId) -> Vec<&Edge> {
        self.edges().into_iter().filter(|e| e.touches(id)).collect()
    }

    /// Whether `ancestor` reaches `id` through parent edges
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut stack = self.parents(id);
        let mut seen: Vec<NodeId> = Vec::new();
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if seen.contains(&current) {
                continue;
            }
            seen.push(current);
            stack.extend(self.parents(current));
        }
        false
    }
}
