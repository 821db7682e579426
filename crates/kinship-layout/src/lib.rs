//! Kinship Layout
//!
//! Deterministic generational layout for pedigree charts.
//!
//! The engine is a pure function of the graph: it assigns each node a
//! generation (layer), places couples and solo nodes over their children,
//! resolves overlaps within each layer, packs the maternal and paternal
//! sides around the ego's parents and finally translates the drawing to the
//! configured origin or into a viewport.
//!
//! # Example
//!
//! ```
//! use kinship_domain::{NewEdge, NewNode, Sex};
//! use kinship_layout::{LayoutEngine, LayoutConfig};
//! use kinship_store::FamilyGraph;
//!
//! let mut graph = FamilyGraph::new();
//! let ego = graph.add_node(NewNode::new("You", Sex::Female).ego()).unwrap().value;
//! let mother = graph.add_node(NewNode::new("mother", Sex::Female)).unwrap().value;
//! graph.add_edge(NewEdge::parent(mother, ego)).unwrap();
//!
//! let layout = LayoutEngine::new(LayoutConfig::default()).compute(&graph, None);
//! assert_eq!(layout.layer(mother), Some(0));
//! assert_eq!(layout.layer(ego), Some(1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod engine;
mod frame;
mod layering;
mod overlap;
mod placement;
mod sides;

pub use config::{LayoutConfig, Viewport};
pub use engine::{Layout, LayoutEngine};
