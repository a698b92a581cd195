//! Verification of Merkle inclusion proofs built with the [Poseidon] 2-to-1 hash.

use alloc::vec::Vec;

#[cfg(feature = "concurrent")]
use rayon::prelude::*;

use super::{Felt, hash::Poseidon};

mod error;
pub use error::MerkleError;

mod path;
pub use path::{MerkleProof, PathNode};

mod tree;
pub use tree::MerkleTree;


#[cfg(test)]
mod proptest_tests;

// PATH VERIFICATION
// ================================================================================================

/// Recomputes the root from `leaf` and the path given as two position-paired sequences, and
/// returns true if it equals `root`.
///
/// Path entries are ordered from the leaf towards the root. When `flags[i]` is set, the current
/// node is the right child at that level and is hashed as `hash2(siblings[i], current)`;
/// otherwise it is hashed as `hash2(current, siblings[i])`. An empty path verifies iff
/// `leaf == root`.
///
/// # Errors
/// Returns an error if `siblings` and `flags` have different lengths.
pub fn verify_path(
    root: Felt,
    leaf: Felt,
    siblings: &[Felt],
    flags: &[bool],
) -> Result<bool, MerkleError> {
    if siblings.len() != flags.len() {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            siblings = siblings.len(),
            flags = flags.len(),
            "merkle path sequences differ in length"
        );
        return Err(MerkleError::LengthMismatch { siblings: siblings.len(), flags: flags.len() });
    }

    let computed = siblings
        .iter()
        .zip(flags)
        .fold(leaf, |current, (&sibling, &is_right)| hash_parent(current, sibling, is_right));

    Ok(computed == root)
}

/// Computes the parent of `current` and its `sibling`.
#[inline(always)]
pub(crate) fn hash_parent(current: Felt, sibling: Felt, is_right: bool) -> Felt {
    if is_right {
        Poseidon::hash2(sibling, current)
    } else {
        Poseidon::hash2(current, sibling)
    }
}

// MEMBERSHIP CLAIM
// ================================================================================================

/// A claim that `leaf` is included in the tree committed to by `root`, together with the proof
/// backing it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MembershipClaim {
    pub root: Felt,
    pub leaf: Felt,
    pub proof: MerkleProof,
}

impl MembershipClaim {
    pub fn new(root: Felt, leaf: Felt, proof: MerkleProof) -> Self {
        Self { root, leaf, proof }
    }

    /// Returns true if the proof opens `leaf` to `root`.
    pub fn verify(&self) -> bool {
        self.proof.verify(self.root, self.leaf)
    }
}

/// Verifies many independent membership claims, returning one result per claim in input order.
///
/// When the `concurrent` feature is enabled the claims are verified in parallel.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(len = claims.len()))
)]
pub fn verify_batch(claims: &[MembershipClaim]) -> Vec<bool> {
    #[cfg(feature = "concurrent")]
    let results = claims.par_iter().map(MembershipClaim::verify).collect();

    #[cfg(not(feature = "concurrent"))]
    let results = claims.iter().map(MembershipClaim::verify).collect();

    results
}
