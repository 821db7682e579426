//! Kinship Storage Layer
//!
//! In-memory graph store for pedigrees. [`FamilyGraph`] owns the node and
//! edge maps, enforces the graph invariants on every transaction and reports
//! the side effects each transaction caused (locks, unlocks, cascading
//! removals) as an explicit [`Effect`] list instead of mutating hidden state.
//!
//! # Invariants
//!
//! - Every edge references existing nodes
//! - At most one node is the ego
//! - A node has at most two parents
//! - No duplicate couple edge for the same pair; at most one current partner
//! - Parent edges never form a cycle
//!
//! A transaction validates everything before it mutates, so a failed call
//! leaves the graph exactly as it was.
//!
//! # Examples
//!
//! ```
//! use kinship_domain::{NewEdge, NewNode, PedigreeView, Sex};
//! use kinship_store::FamilyGraph;
//!
//! let mut graph = FamilyGraph::new();
//! let mother = graph.add_node(NewNode::new("mother", Sex::Female)).unwrap().value;
//! let ego = graph.add_node(NewNode::new("You", Sex::Male).ego()).unwrap().value;
//! graph.add_edge(NewEdge::parent(mother, ego)).unwrap();
//!
//! assert_eq!(graph.parents(ego), vec![mother]);
//! assert!(graph.node(mother).unwrap().read_only);
//! ```

#![warn(missing_docs)]

mod effect;
mod error;
mod graph;

pub use effect::{Applied, Effect};
pub use error::StoreError;
pub use graph::FamilyGraph;
