//! Error types for pedigree sessions

use kinship_store::StoreError;
use thiserror::Error;

/// Errors raised by [`Pedigree`](crate::Pedigree) operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PedigreeError {
    /// A store invariant was violated; the graph is unchanged
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Census seeding needs a graph holding at most the ego
    #[error("Pedigree already seeded: {nodes} non-ego nodes present")]
    AlreadySeeded {
        /// Number of non-ego nodes found
        nodes: usize,
    },
}
