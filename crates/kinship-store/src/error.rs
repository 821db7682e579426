//! Store error types

use kinship_domain::{EdgeId, NodeId};
use thiserror::Error;

/// Invariant violations raised by store transactions
///
/// These indicate a caller bug: the transaction is rejected before any
/// mutation is applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Edge not found
    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// A node with this id already exists
    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),

    /// Another node is already the ego
    #[error("An ego node already exists: {0}")]
    EgoConflict(NodeId),

    /// The ego node is never removed
    #[error("The ego node cannot be removed: {0}")]
    EgoRemoval(NodeId),

    /// Read-only nodes cannot be removed or have identity fields changed
    #[error("Node is read-only: {0}")]
    ReadOnly(NodeId),

    /// The child already has two parents
    #[error("Node already has two parents: {0}")]
    ParentLimit(NodeId),

    /// The parent edge would close a loop in the ancestry
    #[error("Parent edge {parent} -> {child} would create a cycle")]
    Cycle {
        /// Proposed parent
        parent: NodeId,
        /// Proposed child
        child: NodeId,
    },

    /// The node already has a current partner
    #[error("Node {node} already has partner {partner}")]
    PartnerConflict {
        /// Node receiving the new partner edge
        node: NodeId,
        /// Its existing partner
        partner: NodeId,
    },

    /// Edges must join two distinct nodes
    #[error("Edge endpoints must differ: {0}")]
    SelfLoop(NodeId),
}
