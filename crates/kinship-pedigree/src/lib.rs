//! Kinship Pedigree
//!
//! The interview-facing pedigree session. [`Pedigree`] owns a
//! [`FamilyGraph`](kinship_store::FamilyGraph), applies relationship
//! inference and census seeding as all-or-nothing transactions, and
//! re-runs the layout engine after every successful mutation.
//!
//! # Example
//!
//! ```
//! use kinship_domain::{PedigreeView, Sex};
//! use kinship_pedigree::{CensusCounts, Pedigree};
//!
//! let mut pedigree = Pedigree::new();
//! let counts = CensusCounts { brothers: 1, sisters: 2, ..CensusCounts::default() };
//! pedigree.generate_placeholder_network(&counts, Sex::Male).unwrap();
//!
//! let json = pedigree.snapshot().to_json().unwrap();
//! assert!(json.contains("\"maternal grandmother\""));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod census;
pub mod config;
pub mod error;
pub mod inference;
pub mod pedigree;
pub mod snapshot;

pub use census::{CensusCounts, Scaffold};
pub use config::{ConfigError, PedigreeConfig};
pub use error::PedigreeError;
pub use inference::{DetachReason, Placement};
pub use pedigree::Pedigree;
pub use snapshot::{EdgeRecord, NodeMetadata, NodeRecord, PedigreeSnapshot};
