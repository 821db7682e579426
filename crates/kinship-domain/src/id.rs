//! Identifiers for nodes and edges

use crate::RelationshipType;
use std::fmt;

/// Unique identifier for a pedigree node, based on UUIDv7
///
/// Identifiers are opaque and stable for the node's lifetime. Layout
/// tie-breaking never looks at them; it uses the store's insertion
/// sequence instead (see [`crate::Node::seq`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u128);

impl NodeId {
    /// Generate a new UUIDv7-based NodeId
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::NodeId;
    ///
    /// let a = NodeId::new();
    /// let b = NodeId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a NodeId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a NodeId from its UUID string form
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::NodeId;
    ///
    /// let id = NodeId::new();
    /// let parsed = NodeId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid node id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Identifier for an edge
///
/// When the caller does not supply one, the id is derived from
/// `(source, target, relationship)` so that inserting the same edge twice
/// is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(String);

impl EdgeId {
    /// Wrap a caller-supplied edge id
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Derive the deterministic id for an edge
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::{EdgeId, NodeId, RelationshipType};
    ///
    /// let a = NodeId::from_value(1);
    /// let b = NodeId::from_value(2);
    /// assert_eq!(
    ///     EdgeId::derive(a, b, RelationshipType::Parent),
    ///     EdgeId::derive(a, b, RelationshipType::Parent),
    /// );
    /// ```
    pub fn derive(source: NodeId, target: NodeId, relationship: RelationshipType) -> Self {
        Self(format!("{}_{}_{}", source, target, relationship.as_str()))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: string form round-trips for any raw value
        #[test]
        fn test_node_id_string_roundtrip(value: u128) {
            let id = NodeId::from_value(value);
            match NodeId::from_string(&id.to_string()) {
                Ok(parsed) => prop_assert_eq!(id, parsed),
                Err(e) => return Err(TestCaseError::fail(e)),
            }
        }

        /// Property: derived edge ids are injective over the endpoint pair
        #[test]
        fn test_edge_id_injective(a: u128, b: u128, c: u128) {
            prop_assume!(b != c);
            let source = NodeId::from_value(a);
            let first = EdgeId::derive(source, NodeId::from_value(b), RelationshipType::Parent);
            let second = EdgeId::derive(source, NodeId::from_value(c), RelationshipType::Parent);
            prop_assert_ne!(first, second);
        }
    }
}
