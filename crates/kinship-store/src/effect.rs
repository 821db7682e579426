//! Derived effects reported by store transactions

use kinship_domain::{EdgeId, NodeId};

/// A change a transaction made beyond the one that was asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Node became read-only because it gained a child
    Locked(NodeId),

    /// Node lost its last child and was unlocked
    Unlocked(NodeId),

    /// Node was removed (explicitly or by cascade)
    NodeRemoved(NodeId),

    /// Edge was removed (explicitly or by cascade)
    EdgeRemoved(EdgeId),
}

/// Result of a successful transaction: its value plus derived effects
#[derive(Debug, Clone, PartialEq)]
pub struct Applied<T> {
    /// The transaction's return value
    pub value: T,

    /// Effects, in the order they happened
    pub effects: Vec<Effect>,
}

impl<T> Applied<T> {
    /// A result without derived effects
    pub fn new(value: T) -> Self {
        Self {
            value,
            effects: Vec::new(),
        }
    }

    /// A result with derived effects
    pub fn with_effects(value: T, effects: Vec<Effect>) -> Self {
        Self { value, effects }
    }

    /// Discard the effects
    pub fn into_value(self) -> T {
        self.value
    }

    /// Nodes removed by this transaction
    pub fn removed_nodes(&self) -> Vec<NodeId> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                Effect::NodeRemoved(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Nodes unlocked by this transaction
    pub fn unlocked(&self) -> Vec<NodeId> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                Effect::Unlocked(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}
