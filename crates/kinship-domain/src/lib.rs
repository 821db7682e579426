//! Kinship Domain Layer
//!
//! Value types and trait interfaces for the pedigree engine. Every other crate
//! in the workspace depends on this one; it carries no infrastructure and only
//! a single external dependency (`uuid`, for node identifiers).
//!
//! ## Key Concepts
//!
//! - **Node**: a person placeholder in the pedigree, possibly linked to an
//!   entity in the surrounding interview network
//! - **Edge**: a `parent`, `partner` or `ex-partner` relationship
//! - **Ego**: the respondent; exactly one per pedigree
//! - **Relation**: a relative kind a respondent can declare ("paternal aunt",
//!   "half brother"), with its sex and the way it attaches to the graph
//! - **PedigreeView**: read access plus the derived family queries used by
//!   the store, the layout engine and the inference rules

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod id;
pub mod person;
pub mod relation;
pub mod relationship;
pub mod traits;

// Re-exports for convenience
pub use id::{EdgeId, NodeId};
pub use person::{NewNode, Node, NodePatch, Point, Sex};
pub use relation::{ConnectionStrategy, Relation, Side};
pub use relationship::{Edge, NewEdge, RelationshipType};
pub use traits::PedigreeView;
