//! The in-memory pedigree graph

use crate::{Applied, Effect, StoreError};
use kinship_domain::{
    Edge, EdgeId, NewEdge, NewNode, Node, NodeId, NodePatch, PedigreeView, Point,
    RelationshipType,
};
use std::collections::HashMap;

/// Mutable pedigree graph with invariant enforcement
///
/// Nodes and edges carry the insertion sequence number assigned here;
/// [`PedigreeView::nodes`] and [`PedigreeView::edges`] return them in that
/// order so every consumer sees a reproducible iteration order.
///
/// # Thread Safety
///
/// Single writer, no interior mutability. Callers serialize mutations.
#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    nodes: HashMap<NodeId, Node>,
    edges: HashMap<EdgeId, Edge>,
    next_seq: u64,
}

impl FamilyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up an edge by id
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// First node (in insertion order) carrying this label
    pub fn find_by_label(&self, label: &str) -> Option<&Node> {
        self.nodes().into_iter().find(|n| n.label == label)
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Insert a node
    ///
    /// # Errors
    ///
    /// Fails if the id is already taken or if the node claims to be the ego
    /// while another ego exists.
    pub fn add_node(&mut self, new: NewNode) -> Result<Applied<NodeId>, StoreError> {
        let id = new.id.unwrap_or_default();

        if self.nodes.contains_key(&id) {
            return Err(StoreError::DuplicateNode(id));
        }
        if new.is_ego {
            if let Some(ego) = self.ego() {
                return Err(StoreError::EgoConflict(ego.id));
            }
        }

        let seq = self.next_seq();
        self.nodes.insert(
            id,
            Node {
                id,
                seq,
                label: new.label,
                sex: new.sex,
                is_ego: new.is_ego,
                read_only: new.read_only,
                interview_network_id: new.interview_network_id,
                position: None,
            },
        );

        Ok(Applied::new(id))
    }

    /// Apply a field patch to a node
    ///
    /// # Errors
    ///
    /// Fails if the node does not exist, or if the patch changes `label` or
    /// `sex` of a read-only node.
    pub fn update_node(&mut self, id: NodeId, patch: NodePatch) -> Result<Applied<()>, StoreError> {
        let node = self.nodes.get_mut(&id).ok_or(StoreError::NodeNotFound(id))?;

        if node.read_only && patch.changes_identity() {
            return Err(StoreError::ReadOnly(id));
        }

        if let Some(label) = patch.label {
            node.label = label;
        }
        if let Some(sex) = patch.sex {
            node.sex = sex;
        }
        if let Some(read_only) = patch.read_only {
            node.read_only = read_only;
        }
        if let Some(link) = patch.interview_network_id {
            node.interview_network_id = link;
        }

        Ok(Applied::new(()))
    }

    /// Remove a node and everything that only existed to support it
    ///
    /// Incident edges are removed; former parents that are left childless
    /// are unlocked; partners and ex-partners left without any edge are
    /// removed recursively.
    ///
    /// # Errors
    ///
    /// Fails for unknown ids, for the ego, and for read-only nodes.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Applied<()>, StoreError> {
        let node = self.nodes.get(&id).ok_or(StoreError::NodeNotFound(id))?;

        if node.is_ego {
            return Err(StoreError::EgoRemoval(id));
        }
        if node.read_only {
            return Err(StoreError::ReadOnly(id));
        }

        let mut effects = Vec::new();
        self.detach(id, &mut effects);
        Ok(Applied::with_effects((), effects))
    }

    /// Remove a node without lock checks, cascading to isolated partners
    fn detach(&mut self, id: NodeId, effects: &mut Vec<Effect>) {
        let incident: Vec<Edge> = self.incident_edges(id).into_iter().cloned().collect();

        let former_parents: Vec<NodeId> = incident
            .iter()
            .filter(|e| e.relationship == RelationshipType::Parent && e.target == id)
            .map(|e| e.source)
            .collect();
        let former_mates: Vec<NodeId> = incident
            .iter()
            .filter(|e| e.relationship.is_couple())
            .filter_map(|e| e.other(id))
            .collect();

        for edge in incident {
            self.edges.remove(&edge.id);
            effects.push(Effect::EdgeRemoved(edge.id));
        }
        self.nodes.remove(&id);
        effects.push(Effect::NodeRemoved(id));

        for parent in former_parents {
            self.unlock_if_childless(parent, effects);
        }

        for mate in former_mates {
            let isolated = self.nodes.get(&mate).is_some_and(|n| !n.is_ego)
                && self.incident_edges(mate).is_empty();
            if isolated {
                tracing::debug!(removed = %id, partner = %mate, "Removing isolated partner");
                self.detach(mate, effects);
            }
        }
    }

    /// Insert an edge
    ///
    /// Inserting an edge whose id already exists is a no-op, as is a second
    /// couple edge of the same kind between the same pair. A new `parent`
    /// edge locks the parent and its partners.
    ///
    /// # Errors
    ///
    /// Fails for unknown endpoints, self loops, a third parent, an ancestry
    /// cycle, or a second current partner.
    pub fn add_edge(&mut self, new: NewEdge) -> Result<Applied<EdgeId>, StoreError> {
        let id = new.resolved_id();
        if self.edges.contains_key(&id) {
            return Ok(Applied::new(id));
        }

        let NewEdge {
            source,
            target,
            relationship,
            ..
        } = new;

        for endpoint in [source, target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(StoreError::NodeNotFound(endpoint));
            }
        }
        if source == target {
            return Err(StoreError::SelfLoop(source));
        }

        if let Some(existing) = self.equivalent_edge(source, target, relationship) {
            return Ok(Applied::new(existing));
        }

        match relationship {
            RelationshipType::Parent => {
                if self.parents(target).len() >= 2 {
                    return Err(StoreError::ParentLimit(target));
                }
                if self.is_ancestor(target, source) {
                    return Err(StoreError::Cycle {
                        parent: source,
                        child: target,
                    });
                }
            }
            RelationshipType::Partner => {
                for node in [source, target] {
                    if let Some(partner) = self.partner(node) {
                        return Err(StoreError::PartnerConflict { node, partner });
                    }
                }
            }
            RelationshipType::ExPartner => {}
        }

        let seq = self.next_seq();
        self.edges.insert(
            id.clone(),
            Edge {
                id: id.clone(),
                seq,
                source,
                target,
                relationship,
            },
        );

        let mut effects = Vec::new();
        if relationship == RelationshipType::Parent {
            self.lock_with_partners(source, &mut effects);
        }

        Ok(Applied::with_effects(id, effects))
    }

    /// An already stored edge expressing the same relationship
    fn equivalent_edge(
        &self,
        source: NodeId,
        target: NodeId,
        relationship: RelationshipType,
    ) -> Option<EdgeId> {
        self.edges()
            .into_iter()
            .filter(|e| e.relationship == relationship)
            .find(|e| {
                if relationship.is_couple() {
                    e.joins(source, target)
                } else {
                    e.source == source && e.target == target
                }
            })
            .map(|e| e.id.clone())
    }

    /// Remove a single edge
    ///
    /// Removing a node's last `parent` edge unlocks it as node removal does.
    ///
    /// # Errors
    ///
    /// Fails if the edge does not exist.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<Applied<()>, StoreError> {
        let edge = self
            .edges
            .remove(id)
            .ok_or_else(|| StoreError::EdgeNotFound(id.clone()))?;

        let mut effects = vec![Effect::EdgeRemoved(edge.id)];
        if edge.relationship == RelationshipType::Parent {
            self.unlock_if_childless(edge.source, &mut effects);
        }

        Ok(Applied::with_effects((), effects))
    }

    /// Remove every edge and every node except the ego
    pub fn clear_network(&mut self) -> Applied<()> {
        let mut effects = Vec::new();

        let mut edges: Vec<Edge> = self.edges.drain().map(|(_, e)| e).collect();
        edges.sort_by_key(|e| e.seq);
        effects.extend(edges.into_iter().map(|e| Effect::EdgeRemoved(e.id)));

        let mut removed: Vec<&Node> = self.nodes.values().filter(|n| !n.is_ego).collect();
        removed.sort_by_key(|n| n.seq);
        let removed: Vec<NodeId> = removed.into_iter().map(|n| n.id).collect();
        for id in removed {
            self.nodes.remove(&id);
            effects.push(Effect::NodeRemoved(id));
        }

        for node in self.nodes.values_mut() {
            node.position = None;
        }

        Applied::with_effects((), effects)
    }

    /// Replace every node's computed position
    ///
    /// Nodes missing from `positions` are left without a position. Only the
    /// layout engine's output should be written here.
    pub fn set_positions<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = (NodeId, Point)>,
    {
        for node in self.nodes.values_mut() {
            node.position = None;
        }
        for (id, point) in positions {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.position = Some(point);
            }
        }
    }

    /// Mark a new parent, its partner and its ex-partners read-only
    fn lock_with_partners(&mut self, parent: NodeId, effects: &mut Vec<Effect>) {
        let mut targets = vec![parent];
        targets.extend(self.partner(parent));
        targets.extend(self.ex_partners(parent));

        for id in targets {
            if let Some(node) = self.nodes.get_mut(&id) {
                if !node.is_ego && !node.read_only {
                    node.read_only = true;
                    tracing::debug!(node = %id, label = %node.label, "Locked parent");
                    effects.push(Effect::Locked(id));
                }
            }
        }
    }

    /// Unlock a parent (and its couples) once it has no children left
    ///
    /// The ego and the mother/father scaffolds stay locked.
    fn unlock_if_childless(&mut self, parent: NodeId, effects: &mut Vec<Effect>) {
        if !self.nodes.contains_key(&parent) || !self.children(parent).is_empty() {
            return;
        }

        let mut targets = vec![parent];
        targets.extend(self.partner(parent));
        targets.extend(self.ex_partners(parent));

        for id in targets {
            if !self.children(id).is_empty() {
                continue;
            }
            if let Some(node) = self.nodes.get_mut(&id) {
                if node.read_only && !node.is_ego && !node.is_pinned_scaffold() {
                    node.read_only = false;
                    tracing::debug!(node = %id, label = %node.label, "Unlocked childless node");
                    effects.push(Effect::Unlocked(id));
                }
            }
        }
    }
}

impl PedigreeView for FamilyGraph {
    fn nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by_key(|n| n.seq);
        nodes
    }

    fn edges(&self) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self.edges.values().collect();
        edges.sort_by_key(|e| e.seq);
        edges
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_domain::Sex;

    fn add(graph: &mut FamilyGraph, label: &str, sex: Sex) -> NodeId {
        graph.add_node(NewNode::new(label, sex)).unwrap().value
    }

    #[test]
    fn test_insertion_order_is_sequence_order() {
        let mut graph = FamilyGraph::new();
        let ids: Vec<NodeId> = (0..6)
            .map(|i| add(&mut graph, &format!("n{}", i), Sex::Female))
            .collect();

        let listed: Vec<NodeId> = graph.nodes().into_iter().map(|n| n.id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn test_failed_add_edge_leaves_graph_untouched() {
        let mut graph = FamilyGraph::new();
        let a = add(&mut graph, "a", Sex::Female);
        let missing = NodeId::from_value(42);

        let before = graph.clone();
        assert_eq!(
            graph.add_edge(NewEdge::parent(a, missing)),
            Err(StoreError::NodeNotFound(missing))
        );
        assert_eq!(graph.edge_count(), before.edge_count());
        assert!(!graph.node(a).unwrap().read_only);
    }

    #[test]
    fn test_reversed_partner_edge_is_idempotent() {
        let mut graph = FamilyGraph::new();
        let a = add(&mut graph, "a", Sex::Female);
        let b = add(&mut graph, "b", Sex::Male);

        let first = graph.add_edge(NewEdge::partner(a, b)).unwrap().value;
        let second = graph.add_edge(NewEdge::partner(b, a)).unwrap().value;

        assert_eq!(first, second);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_ego_never_locked() {
        let mut graph = FamilyGraph::new();
        let ego = graph.add_node(NewNode::new("You", Sex::Male).ego()).unwrap().value;
        let son = add(&mut graph, "son", Sex::Male);

        let applied = graph.add_edge(NewEdge::parent(ego, son)).unwrap();
        assert!(applied.effects.is_empty());
        assert!(!graph.node(ego).unwrap().read_only);
    }

    #[test]
    fn test_set_positions_clears_stale_entries() {
        let mut graph = FamilyGraph::new();
        let a = add(&mut graph, "a", Sex::Female);
        let b = add(&mut graph, "b", Sex::Male);

        graph.set_positions([(a, Point::new(1.0, 2.0)), (b, Point::new(3.0, 4.0))]);
        graph.set_positions([(b, Point::new(5.0, 6.0))]);

        assert_eq!(graph.node(a).unwrap().position, None);
        assert_eq!(graph.node(b).unwrap().position, Some(Point::new(5.0, 6.0)));
    }
}
