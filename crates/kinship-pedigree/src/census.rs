//! Census seeding: build the initial pedigree from relative counts

use kinship_domain::{NewEdge, NewNode, NodeId, NodePatch, PedigreeView, Relation, Sex, Side};
use kinship_store::FamilyGraph;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::inference::PARTNER_LABEL;
use crate::PedigreeError;

/// Label of an ego node created by seeding
pub const EGO_LABEL: &str = "You";

/// Respondent-declared relative counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CensusCounts {
    /// Full brothers of ego
    pub brothers: u32,
    /// Full sisters of ego
    pub sisters: u32,
    /// Sons of ego
    pub sons: u32,
    /// Daughters of ego
    pub daughters: u32,
    /// Brothers of ego's mother
    pub maternal_uncles: u32,
    /// Sisters of ego's mother
    pub maternal_aunts: u32,
    /// Brothers of ego's father
    pub paternal_uncles: u32,
    /// Sisters of ego's father
    pub paternal_aunts: u32,
}

impl CensusCounts {
    /// Number of relatives the counts describe
    pub fn total(&self) -> usize {
        [
            self.brothers,
            self.sisters,
            self.sons,
            self.daughters,
            self.maternal_uncles,
            self.maternal_aunts,
            self.paternal_uncles,
            self.paternal_aunts,
        ]
        .iter()
        .map(|&count| count as usize)
        .sum()
    }

    /// Whether ego has children and therefore needs a partner
    pub fn has_children(&self) -> bool {
        self.sons > 0 || self.daughters > 0
    }
}

/// The nodes created by seeding
#[derive(Debug, Clone, PartialEq)]
pub struct Scaffold {
    /// The ego, pre-existing or created
    pub ego: NodeId,
    /// Ego's mother
    pub mother: NodeId,
    /// Ego's father
    pub father: NodeId,
    /// Maternal grandmother and grandfather
    pub maternal_grandparents: (NodeId, NodeId),
    /// Paternal grandmother and grandfather
    pub paternal_grandparents: (NodeId, NodeId),
    /// Ego's partner, created when ego has children
    pub partner: Option<NodeId>,
    /// Generated relatives in creation order
    pub relatives: Vec<NodeId>,
}

impl Scaffold {
    /// Number of nodes in the seeded pedigree, ego included
    pub fn node_count(&self) -> usize {
        7 + usize::from(self.partner.is_some()) + self.relatives.len()
    }
}

/// Seed `graph` with the standard scaffold plus the counted relatives
///
/// # Errors
///
/// Fails with [`PedigreeError::AlreadySeeded`] if the graph holds anything
/// besides the ego. Callers run this on a checkpoint.
pub(crate) fn seed(
    graph: &mut FamilyGraph,
    counts: &CensusCounts,
    ego_sex: Sex,
) -> Result<Scaffold, PedigreeError> {
    let others = graph.nodes().into_iter().filter(|n| !n.is_ego).count();
    if others > 0 {
        return Err(PedigreeError::AlreadySeeded { nodes: others });
    }

    let ego = match graph.ego().map(|n| n.id) {
        Some(id) => {
            let patch = NodePatch {
                sex: Some(ego_sex),
                ..NodePatch::default()
            };
            graph.update_node(id, patch)?;
            id
        }
        None => graph.add_node(NewNode::new(EGO_LABEL, ego_sex).ego())?.value,
    };

    let mut scaffold = |label: &str, sex: Sex| -> Result<NodeId, PedigreeError> {
        Ok(graph.add_node(NewNode::new(label, sex).read_only())?.value)
    };
    let mgm = scaffold("maternal grandmother", Sex::Female)?;
    let mgf = scaffold("maternal grandfather", Sex::Male)?;
    let pgm = scaffold("paternal grandmother", Sex::Female)?;
    let pgf = scaffold("paternal grandfather", Sex::Male)?;
    let mother = scaffold("mother", Sex::Female)?;
    let father = scaffold("father", Sex::Male)?;
    let partner = if counts.has_children() {
        Some(scaffold(PARTNER_LABEL, ego_sex.opposite())?)
    } else {
        None
    };

    graph.add_edge(NewEdge::partner(mgm, mgf))?;
    graph.add_edge(NewEdge::partner(pgm, pgf))?;
    for parent in [mgm, mgf] {
        graph.add_edge(NewEdge::parent(parent, mother))?;
    }
    for parent in [pgm, pgf] {
        graph.add_edge(NewEdge::parent(parent, father))?;
    }
    graph.add_edge(NewEdge::partner(father, mother))?;
    for parent in [mother, father] {
        graph.add_edge(NewEdge::parent(parent, ego))?;
    }
    if let Some(partner) = partner {
        graph.add_edge(NewEdge::partner(ego, partner))?;
    }

    let own_children = partner.map(|p| (ego, p));
    let groups = [
        (counts.brothers, Relation::Sibling(Sex::Male), Some((mother, father))),
        (counts.sisters, Relation::Sibling(Sex::Female), Some((mother, father))),
        (counts.sons, Relation::Child(Sex::Male), own_children),
        (counts.daughters, Relation::Child(Sex::Female), own_children),
        (counts.maternal_uncles, aunt_or_uncle(Sex::Male, Side::Maternal), Some((mgm, mgf))),
        (counts.maternal_aunts, aunt_or_uncle(Sex::Female, Side::Maternal), Some((mgm, mgf))),
        (counts.paternal_uncles, aunt_or_uncle(Sex::Male, Side::Paternal), Some((pgm, pgf))),
        (counts.paternal_aunts, aunt_or_uncle(Sex::Female, Side::Paternal), Some((pgm, pgf))),
    ];

    let mut relatives = Vec::with_capacity(counts.total());
    for (count, relation, parents) in groups {
        // Only children depend on the partner, which exists whenever they are counted
        let Some((a, b)) = parents else { continue };
        for _ in 0..count {
            let id = graph.add_node(NewNode::new(relation.label(None), relation.sex()))?.value;
            graph.add_edge(NewEdge::parent(a, id))?;
            graph.add_edge(NewEdge::parent(b, id))?;
            relatives.push(id);
        }
    }

    let scaffold = Scaffold {
        ego,
        mother,
        father,
        maternal_grandparents: (mgm, mgf),
        paternal_grandparents: (pgm, pgf),
        partner,
        relatives,
    };

    info!(
        nodes = scaffold.node_count(),
        relatives = scaffold.relatives.len(),
        partner = scaffold.partner.is_some(),
        "Seeded placeholder network"
    );

    Ok(scaffold)
}

fn aunt_or_uncle(sex: Sex, side: Side) -> Relation {
    Relation::AuntOrUncle {
        sex,
        side: Some(side),
    }
}
