//! The pedigree session: store, inference and layout behind one API

use kinship_domain::{
    Edge, EdgeId, NewEdge, NewNode, Node, NodeId, NodePatch, PedigreeView, Relation, Sex,
};
use kinship_layout::{Layout, LayoutEngine, Viewport};
use kinship_store::{Applied, FamilyGraph};
use tracing::{debug, warn};

use crate::census::{self, CensusCounts, Scaffold};
use crate::inference::{self, Placement};
use crate::snapshot::{collect_metadata, NodeMetadata, PedigreeSnapshot};
use crate::{PedigreeConfig, PedigreeError};

/// A pedigree under construction during an interview
///
/// Every mutating call runs to completion, including a full layout
/// recomputation, before it returns. A failed call leaves the graph exactly
/// as it was.
///
/// # Examples
///
/// ```
/// use kinship_domain::{PedigreeView, Sex};
/// use kinship_pedigree::{CensusCounts, Pedigree};
///
/// let mut pedigree = Pedigree::new();
/// let counts = CensusCounts { sisters: 1, ..CensusCounts::default() };
/// let scaffold = pedigree.generate_placeholder_network(&counts, Sex::Female).unwrap();
///
/// let placement = pedigree.add_placeholder_node("halfBrother", Some(scaffold.father)).unwrap();
/// assert!(placement.unwrap().is_connected());
/// assert!(pedigree.layout().position(scaffold.ego).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pedigree {
    graph: FamilyGraph,
    engine: LayoutEngine,
    viewport: Option<Viewport>,
    layout: Layout,
}

impl Pedigree {
    /// An empty pedigree with default geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty pedigree with the given configuration
    pub fn with_config(config: PedigreeConfig) -> Self {
        Self {
            graph: FamilyGraph::new(),
            engine: LayoutEngine::new(config.layout),
            viewport: config.viewport,
            layout: Layout::default(),
        }
    }

    /// The underlying graph
    pub fn graph(&self) -> &FamilyGraph {
        &self.graph
    }

    /// The most recent layout
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The viewport used for centring, if any
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Run `op` against the graph; restore the checkpoint on error, re-layout on success
    fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut FamilyGraph) -> Result<T, PedigreeError>,
    ) -> Result<T, PedigreeError> {
        let checkpoint = self.graph.clone();
        match op(&mut self.graph) {
            Ok(value) => {
                self.relayout();
                Ok(value)
            }
            Err(err) => {
                debug!(error = %err, "Transaction rolled back");
                self.graph = checkpoint;
                Err(err)
            }
        }
    }

    /// Recompute the layout from scratch and store positions on the nodes
    pub fn relayout(&mut self) {
        self.layout = self.engine.compute(&self.graph, self.viewport);
        self.graph.set_positions(self.layout.positions());
    }

    /// Change the viewport and re-layout
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
        self.relayout();
    }

    /// Insert a node
    pub fn add_node(&mut self, node: NewNode) -> Result<Applied<NodeId>, PedigreeError> {
        self.transact(|graph| Ok(graph.add_node(node)?))
    }

    /// Patch a node's fields
    pub fn update_node(&mut self, id: NodeId, patch: NodePatch) -> Result<Applied<()>, PedigreeError> {
        self.transact(|graph| Ok(graph.update_node(id, patch)?))
    }

    /// Remove a node along with its edges and any mate left isolated
    pub fn remove_node(&mut self, id: NodeId) -> Result<Applied<()>, PedigreeError> {
        self.transact(|graph| Ok(graph.remove_node(id)?))
    }

    /// Insert an edge; re-adding an existing id is a no-op
    pub fn add_edge(&mut self, edge: NewEdge) -> Result<Applied<EdgeId>, PedigreeError> {
        self.transact(|graph| Ok(graph.add_edge(edge)?))
    }

    /// Remove an edge
    pub fn remove_edge(&mut self, id: &EdgeId) -> Result<Applied<()>, PedigreeError> {
        self.transact(|graph| Ok(graph.remove_edge(id)?))
    }

    /// Remove everything except the ego
    pub fn clear_network(&mut self) -> Applied<()> {
        let applied = self.graph.clear_network();
        self.relayout();
        applied
    }

    /// Add a relative named by a free-text keyword
    ///
    /// Unrecognised keywords are logged and skipped: `Ok(None)` is returned
    /// and nothing is created.
    pub fn add_placeholder_node(
        &mut self,
        keyword: &str,
        anchor: Option<NodeId>,
    ) -> Result<Option<Placement>, PedigreeError> {
        let Some(relation) = Relation::parse(keyword) else {
            warn!(keyword, "Unrecognised relation keyword, nothing added");
            return Ok(None);
        };
        self.add_relative(relation, anchor).map(Some)
    }

    /// Add a relative of a known kind
    pub fn add_relative(
        &mut self,
        relation: Relation,
        anchor: Option<NodeId>,
    ) -> Result<Placement, PedigreeError> {
        self.transact(|graph| Ok(inference::add_relative(graph, relation, anchor)?))
    }

    /// Seed the scaffold and the counted relatives around the ego
    pub fn generate_placeholder_network(
        &mut self,
        counts: &CensusCounts,
        ego_sex: Sex,
    ) -> Result<Scaffold, PedigreeError> {
        self.transact(|graph| census::seed(graph, counts, ego_sex))
    }

    /// Metadata of nodes linked to the interview network
    pub fn sync_metadata(&self) -> Vec<NodeMetadata> {
        collect_metadata(&self.graph)
    }

    /// Node and edge maps with current positions
    pub fn snapshot(&self) -> PedigreeSnapshot {
        PedigreeSnapshot::capture(&self.graph)
    }
}

impl PedigreeView for Pedigree {
    fn nodes(&self) -> Vec<&Node> {
        self.graph.nodes()
    }

    fn edges(&self) -> Vec<&Edge> {
        self.graph.edges()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph.node(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_store::StoreError;

    #[test]
    fn test_failed_transaction_restores_graph() {
        let mut pedigree = Pedigree::new();
        pedigree
            .generate_placeholder_network(&CensusCounts::default(), Sex::Male)
            .unwrap();
        let before = pedigree.snapshot();

        // Unknown anchor fails after nothing else has changed
        let err = pedigree
            .add_relative(Relation::Grandchild(Sex::Male), Some(NodeId::new()))
            .unwrap_err();
        assert!(matches!(err, PedigreeError::Store(StoreError::NodeNotFound(_))));
        assert_eq!(pedigree.snapshot(), before);
    }

    #[test]
    fn test_rejected_edge_leaves_graph_untouched() {
        let mut pedigree = Pedigree::new();
        let scaffold = pedigree
            .generate_placeholder_network(&CensusCounts::default(), Sex::Female)
            .unwrap();
        let stranger = pedigree.add_node(NewNode::new("stranger", Sex::Male)).unwrap().value;
        let before = pedigree.snapshot();

        // The mother already has two parents
        let err = pedigree.add_edge(NewEdge::parent(stranger, scaffold.mother)).unwrap_err();
        assert_eq!(err, PedigreeError::Store(StoreError::ParentLimit(scaffold.mother)));
        assert_eq!(pedigree.snapshot(), before);
    }

    #[test]
    fn test_unknown_keyword_is_skipped() {
        let mut pedigree = Pedigree::new();
        pedigree.add_node(NewNode::new("You", Sex::Male).ego()).unwrap();

        assert_eq!(pedigree.add_placeholder_node("stepcousin", None).unwrap(), None);
        assert_eq!(pedigree.graph().node_count(), 1);
    }

    #[test]
    fn test_positions_written_back() {
        let mut pedigree = Pedigree::new();
        let scaffold = pedigree
            .generate_placeholder_network(&CensusCounts::default(), Sex::Male)
            .unwrap();
        let mother = pedigree.node(scaffold.mother).unwrap();
        assert_eq!(mother.position, pedigree.layout().position(scaffold.mother));
        assert!(mother.position.is_some());
    }

    #[test]
    fn test_clear_network_keeps_ego() {
        let mut pedigree = Pedigree::new();
        let scaffold = pedigree
            .generate_placeholder_network(&CensusCounts { brothers: 2, ..CensusCounts::default() }, Sex::Male)
            .unwrap();

        pedigree.clear_network();
        assert_eq!(pedigree.graph().node_count(), 1);
        assert_eq!(pedigree.ego().unwrap().id, scaffold.ego);
        assert_eq!(pedigree.layout().len(), 1);
    }

    #[test]
    fn test_viewport_recentres() {
        let mut pedigree = Pedigree::new();
        let ego = pedigree.add_node(NewNode::new("You", Sex::Male).ego()).unwrap().value;
        pedigree.set_viewport(Some(Viewport::new(500.0, 300.0)));

        let p = pedigree.layout().position(ego).unwrap();
        assert!((p.x - 250.0).abs() < 1e-6);
        assert!((p.y - 150.0).abs() < 1e-6);
    }
}
