//! Relationship inference: wiring a declared relative into the graph
//!
//! Each [`Relation`] carries its own connection strategy. Missing context
//! (no anchor, no ego, no parents to attach to) is not an error: the new
//! node is kept, a warning is logged and the result is
//! [`Placement::Detached`] so callers know the chart position is not
//! meaningful.

use kinship_domain::{
    ConnectionStrategy, EdgeId, NewEdge, NewNode, NodeId, PedigreeView, Relation, RelationshipType,
};
use kinship_store::{FamilyGraph, StoreError};
use std::fmt;
use tracing::{debug, warn};

/// Label given to a synthesized current partner
pub const PARTNER_LABEL: &str = "partner";

/// Label given to a synthesized ex-partner
pub const EX_PARTNER_LABEL: &str = "ex-partner";

/// Why a new relative could not be connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachReason {
    /// The relation needs an anchor node and none was given
    MissingAnchor,

    /// There is no ego node to attach to
    MissingEgo,

    /// The node it should descend from has no parents
    MissingParents,
}

impl fmt::Display for DetachReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DetachReason::MissingAnchor => "no anchor node given",
            DetachReason::MissingEgo => "no ego node",
            DetachReason::MissingParents => "no parents to attach to",
        };
        f.write_str(text)
    }
}

/// Outcome of adding a relative
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// The node is wired into the family
    Connected {
        /// The new relative
        node: NodeId,
        /// Partner or ex-partner created to act as the other parent
        synthesized: Option<NodeId>,
        /// Edges created, in insertion order
        edges: Vec<EdgeId>,
    },

    /// The node exists but has no edges
    Detached {
        /// The new relative
        node: NodeId,
        /// What was missing
        reason: DetachReason,
    },
}

impl Placement {
    /// The new relative
    pub fn node(&self) -> NodeId {
        match self {
            Placement::Connected { node, .. } | Placement::Detached { node, .. } => *node,
        }
    }

    /// Whether the node was wired into the family
    pub fn is_connected(&self) -> bool {
        matches!(self, Placement::Connected { .. })
    }
}

/// Add `relation` relative to `anchor`
///
/// # Errors
///
/// Fails if `anchor` names a node that does not exist, or if a store
/// invariant rejects one of the edges. Callers run this on a checkpoint.
pub(crate) fn add_relative(
    graph: &mut FamilyGraph,
    relation: Relation,
    anchor: Option<NodeId>,
) -> Result<Placement, StoreError> {
    let anchor_label = match anchor {
        Some(id) => Some(graph.node(id).ok_or(StoreError::NodeNotFound(id))?.label.clone()),
        None => None,
    };

    let label = relation.label(anchor_label.as_deref());
    let node = graph.add_node(NewNode::new(label, relation.sex()))?.value;

    let detached = |reason: DetachReason| -> Result<Placement, StoreError> {
        warn!(
            relation = relation.keyword(),
            %node,
            %reason,
            "Relative added without connections"
        );
        Ok(Placement::Detached { node, reason })
    };

    let ego = graph.ego().map(|n| n.id);
    let (parents, synthesized) = match relation.strategy() {
        ConnectionStrategy::WithAnchorExPartner => {
            let Some(anchor) = anchor else {
                return detached(DetachReason::MissingAnchor);
            };
            let (mate, created) = ensure_mate(graph, anchor, RelationshipType::ExPartner)?;
            (vec![anchor, mate], created.map(|edge| (mate, edge)))
        }
        ConnectionStrategy::WithAnchorPartner => {
            let Some(anchor) = anchor else {
                return detached(DetachReason::MissingAnchor);
            };
            let (mate, created) = ensure_mate(graph, anchor, RelationshipType::Partner)?;
            (vec![anchor, mate], created.map(|edge| (mate, edge)))
        }
        ConnectionStrategy::WithEgoPartner => {
            let Some(ego) = ego else {
                return detached(DetachReason::MissingEgo);
            };
            let (mate, created) = ensure_mate(graph, ego, RelationshipType::Partner)?;
            (vec![ego, mate], created.map(|edge| (mate, edge)))
        }
        ConnectionStrategy::WithEgoParents => {
            let Some(ego) = ego else {
                return detached(DetachReason::MissingEgo);
            };
            let parents = graph.parents(ego);
            if parents.is_empty() {
                return detached(DetachReason::MissingParents);
            }
            (parents, None)
        }
        ConnectionStrategy::WithAnchorParents => {
            let Some(anchor) = anchor else {
                return detached(DetachReason::MissingAnchor);
            };
            let parents = graph.parents(anchor);
            if parents.is_empty() {
                return detached(DetachReason::MissingParents);
            }
            (parents, None)
        }
    };

    let mut edges = Vec::with_capacity(parents.len() + 1);
    let synthesized = synthesized.map(|(mate, edge)| {
        edges.push(edge);
        mate
    });
    for parent in parents {
        edges.push(graph.add_edge(NewEdge::parent(parent, node))?.value);
    }

    Ok(Placement::Connected {
        node,
        synthesized,
        edges,
    })
}

/// The existing mate of `id` of the given kind, or a new read-only one
///
/// The couple edge is returned only when the mate was created here.
fn ensure_mate(
    graph: &mut FamilyGraph,
    id: NodeId,
    kind: RelationshipType,
) -> Result<(NodeId, Option<EdgeId>), StoreError> {
    let existing = match kind {
        RelationshipType::ExPartner => graph.ex_partner(id),
        _ => graph.partner(id),
    };
    if let Some(mate) = existing {
        return Ok((mate, None));
    }

    let sex = graph.node(id).ok_or(StoreError::NodeNotFound(id))?.sex.opposite();
    let label = match kind {
        RelationshipType::ExPartner => EX_PARTNER_LABEL,
        _ => PARTNER_LABEL,
    };
    let mate = graph.add_node(NewNode::new(label, sex).read_only())?.value;
    let edge = graph.add_edge(NewEdge::new(id, mate, kind))?.value;
    debug!(anchor = %id, %mate, kind = kind.as_str(), "Synthesized mate");

    Ok((mate, Some(edge)))
}
