//! Serialisable views of a pedigree for renderers and persistence

use kinship_domain::{Edge, Node, PedigreeView};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node as handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Display label
    pub label: String,
    /// `"male"` or `"female"`
    pub sex: String,
    /// True for the respondent
    pub is_ego: bool,
    /// Locked against removal and identity edits
    pub read_only: bool,
    /// Link to a committed interview network entity
    pub interview_network_id: Option<String>,
    /// Horizontal position, absent before layout
    pub x: Option<f64>,
    /// Vertical position, absent before layout
    pub y: Option<f64>,
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            label: node.label.clone(),
            sex: node.sex.as_str().to_string(),
            is_ego: node.is_ego,
            read_only: node.read_only,
            interview_network_id: node.interview_network_id.clone(),
            x: node.position.map(|p| p.x),
            y: node.position.map(|p| p.y),
        }
    }
}

/// An edge as handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Parent, or either partner
    pub source: String,
    /// Child, or the other partner
    pub target: String,
    /// `"parent"`, `"partner"` or `"ex-partner"`
    pub relationship: String,
}

impl From<&Edge> for EdgeRecord {
    fn from(edge: &Edge) -> Self {
        Self {
            source: edge.source.to_string(),
            target: edge.target.to_string(),
            relationship: edge.relationship.as_str().to_string(),
        }
    }
}

/// Node map and edge map keyed by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PedigreeSnapshot {
    /// Nodes by id
    pub nodes: BTreeMap<String, NodeRecord>,
    /// Edges by id
    pub edges: BTreeMap<String, EdgeRecord>,
}

impl PedigreeSnapshot {
    /// Capture every node and edge of `view`
    pub fn capture<V: PedigreeView + ?Sized>(view: &V) -> Self {
        Self {
            nodes: view
                .nodes()
                .into_iter()
                .map(|n| (n.id.to_string(), NodeRecord::from(n)))
                .collect(),
            edges: view
                .edges()
                .into_iter()
                .map(|e| (e.id.to_string(), EdgeRecord::from(e)))
                .collect(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Metadata of a node committed to the interview network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    /// The committed entity
    pub interview_network_id: String,
    /// Display label
    pub label: String,
    /// `"male"` or `"female"`
    pub sex: String,
    /// True for the respondent
    pub is_ego: bool,
    /// Locked against removal and identity edits
    pub read_only: bool,
}

/// Metadata for every linked node, in insertion order
pub fn collect_metadata<V: PedigreeView + ?Sized>(view: &V) -> Vec<NodeMetadata> {
    view.nodes()
        .into_iter()
        .filter_map(|n| {
            let id = n.interview_network_id.as_ref()?;
            Some(NodeMetadata {
                interview_network_id: id.clone(),
                label: n.label.clone(),
                sex: n.sex.as_str().to_string(),
                is_ego: n.is_ego,
                read_only: n.read_only,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_domain::{NewEdge, NewNode, Sex};
    use kinship_store::FamilyGraph;

    fn sample() -> FamilyGraph {
        let mut graph = FamilyGraph::new();
        let ego = graph
            .add_node(NewNode::new("You", Sex::Male).ego().linked_to("entity-1"))
            .unwrap()
            .value;
        let mother = graph.add_node(NewNode::new("mother", Sex::Female)).unwrap().value;
        graph.add_edge(NewEdge::parent(mother, ego)).unwrap();
        graph
    }

    #[test]
    fn test_capture() {
        let graph = sample();
        let snapshot = PedigreeSnapshot::capture(&graph);

        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.edges.len(), 1);
        let edge = snapshot.edges.values().next().unwrap();
        assert_eq!(edge.relationship, "parent");
        let mother = snapshot.nodes.values().find(|n| n.label == "mother").unwrap();
        assert!(mother.read_only);
        assert_eq!(mother.x, None);
    }

    #[test]
    fn test_json_field_names() {
        let json = PedigreeSnapshot::capture(&sample()).to_json().unwrap();
        assert!(json.contains("\"isEgo\": true"));
        assert!(json.contains("\"interviewNetworkId\": \"entity-1\""));
        assert!(json.contains("\"relationship\": \"parent\""));
    }

    #[test]
    fn test_metadata_only_for_linked_nodes() {
        let metadata = collect_metadata(&sample());
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata[0].interview_network_id, "entity-1");
        assert!(metadata[0].is_ego);
    }
}
