//! Relationship module - the edges of a pedigree

use crate::{EdgeId, NodeId};

/// Type of relationship between two pedigree nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    /// Directed: source is the parent, target the child
    Parent,

    /// Undirected current couple
    Partner,

    /// Undirected former couple
    ExPartner,
}

impl RelationshipType {
    /// Get the relationship name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Parent => "parent",
            RelationshipType::Partner => "partner",
            RelationshipType::ExPartner => "ex-partner",
        }
    }

    /// Parse a relationship type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "parent" => Some(RelationshipType::Parent),
            "partner" => Some(RelationshipType::Partner),
            "ex-partner" | "expartner" | "ex_partner" => Some(RelationshipType::ExPartner),
            _ => None,
        }
    }

    /// Partner and ex-partner edges join a couple and are queried symmetrically
    pub fn is_couple(&self) -> bool {
        matches!(self, RelationshipType::Partner | RelationshipType::ExPartner)
    }
}

impl std::str::FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relationship: {}", s))
    }
}

/// A stored relationship between two nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Edge identifier
    pub id: EdgeId,

    /// Insertion sequence assigned by the store
    pub seq: u64,

    /// Source node (the parent for `Parent` edges)
    pub source: NodeId,

    /// Target node (the child for `Parent` edges)
    pub target: NodeId,

    /// Kind of relationship
    pub relationship: RelationshipType,
}

impl Edge {
    /// Whether the edge touches the given node
    pub fn touches(&self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }

    /// The endpoint opposite to `id`, if the edge touches it
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.source == id {
            Some(self.target)
        } else if self.target == id {
            Some(self.source)
        } else {
            None
        }
    }

    /// Whether the edge joins exactly this pair, in either direction
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// Edge description accepted by `add_edge`
#[derive(Debug, Clone, PartialEq)]
pub struct NewEdge {
    /// Caller-supplied id; derived from the endpoints when absent
    pub id: Option<EdgeId>,

    /// Source node
    pub source: NodeId,

    /// Target node
    pub target: NodeId,

    /// Kind of relationship
    pub relationship: RelationshipType,
}

impl NewEdge {
    /// Describe an edge with a derived id
    pub fn new(source: NodeId, target: NodeId, relationship: RelationshipType) -> Self {
        Self {
            id: None,
            source,
            target,
            relationship,
        }
    }

    /// `parent` is the parent of `child`
    pub fn parent(parent: NodeId, child: NodeId) -> Self {
        Self::new(parent, child, RelationshipType::Parent)
    }

    /// `a` and `b` are current partners
    pub fn partner(a: NodeId, b: NodeId) -> Self {
        Self::new(a, b, RelationshipType::Partner)
    }

    /// `a` and `b` are former partners
    pub fn ex_partner(a: NodeId, b: NodeId) -> Self {
        Self::new(a, b, RelationshipType::ExPartner)
    }

    /// Use a specific id
    pub fn with_id(mut self, id: EdgeId) -> Self {
        self.id = Some(id);
        self
    }

    /// The id this edge will be stored under
    pub fn resolved_id(&self) -> EdgeId {
        self.id
            .clone()
            .unwrap_or_else(|| EdgeId::derive(self.source, self.target, self.relationship))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_parse() {
        assert_eq!(RelationshipType::parse("parent"), Some(RelationshipType::Parent));
        assert_eq!(RelationshipType::parse("Ex-Partner"), Some(RelationshipType::ExPartner));
        assert_eq!(RelationshipType::parse("sibling"), None);
        assert!(RelationshipType::Partner.is_couple());
        assert!(!RelationshipType::Parent.is_couple());
    }

    #[test]
    fn test_edge_endpoints() {
        let a = NodeId::from_value(1);
        let b = NodeId::from_value(2);
        let c = NodeId::from_value(3);
        let edge = Edge {
            id: EdgeId::derive(a, b, RelationshipType::Partner),
            seq: 0,
            source: a,
            target: b,
            relationship: RelationshipType::Partner,
        };

        assert_eq!(edge.other(a), Some(b));
        assert_eq!(edge.other(b), Some(a));
        assert_eq!(edge.other(c), None);
        assert!(edge.joins(b, a));
        assert!(!edge.joins(a, c));
    }

    #[test]
    fn test_resolved_id() {
        let a = NodeId::from_value(1);
        let b = NodeId::from_value(2);

        let derived = NewEdge::parent(a, b);
        assert_eq!(derived.resolved_id(), EdgeId::derive(a, b, RelationshipType::Parent));

        let custom = NewEdge::parent(a, b).with_id(EdgeId::new("e1"));
        assert_eq!(custom.resolved_id().as_str(), "e1");
    }
}
