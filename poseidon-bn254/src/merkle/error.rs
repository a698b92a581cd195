use thiserror::Error;

use crate::Felt;

/// Errors that can occur when constructing Merkle trees or verifying Merkle paths.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// The sibling and position-flag sequences of a path have different lengths.
    #[error("merkle path has {siblings} siblings but {flags} position flags")]
    LengthMismatch {
        /// Number of siblings provided.
        siblings: usize,
        /// Number of position flags provided.
        flags: usize,
    },

    /// A Merkle tree was requested over an empty leaf sequence.
    #[error("merkle tree must contain at least one leaf")]
    EmptyTree,

    /// The requested leaf index is outside of the tree.
    #[error("leaf index {index} is out of bounds for a merkle tree with {num_leaves} leaves")]
    LeafIndexOutOfBounds { index: usize, num_leaves: usize },

    /// The computed root does not match the expected root.
    #[error("expected merkle root {expected_root} found {actual_root}")]
    ConflictingRoots {
        /// The expected Merkle root.
        expected_root: Felt,
        /// The actual root that was computed.
        actual_root: Felt,
    },
}
