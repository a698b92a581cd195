use alloc::vec::Vec;

#[cfg(feature = "concurrent")]
use rayon::prelude::*;

use super::{Felt, MerkleError, MerkleProof, PathNode, Poseidon};

// MERKLE TREE
// ================================================================================================

/// A binary Merkle tree built over an arbitrary, non-empty number of leaves.
///
/// Every level is built by hashing adjacent pairs with [Poseidon::hash2]; when a level has an odd
/// number of nodes the trailing node is paired with itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// All levels of the tree, starting with the leaves and ending with the single-node root
    /// level.
    levels: Vec<Vec<Felt>>,
}

impl MerkleTree {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------

    /// Returns a Merkle tree instantiated from the provided leaves.
    ///
    /// # Errors
    /// Returns an error if no leaves were provided.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all, fields(num_leaves = leaves.as_ref().len()))
    )]
    pub fn new<T>(leaves: T) -> Result<Self, MerkleError>
    where
        T: AsRef<[Felt]>,
    {
        let leaves = leaves.as_ref();
        if leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        let mut levels = vec![leaves.to_vec()];
        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            let parents = build_parent_level(level);
            levels.push(parents);
        }

        Ok(Self { levels })
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the root of this Merkle tree.
    pub fn root(&self) -> Felt {
        self.levels.last().and_then(|level| level.first()).copied().unwrap_or_default()
    }

    /// Returns the depth of this Merkle tree; a single-leaf tree has depth 0.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.leaves().len()
    }

    /// Returns the leaves of this tree in insertion order.
    pub fn leaves(&self) -> &[Felt] {
        &self.levels[0]
    }

    /// Returns the leaf at the specified index.
    ///
    /// # Errors
    /// Returns an error if the index is not smaller than the number of leaves.
    pub fn get_leaf(&self, index: usize) -> Result<Felt, MerkleError> {
        self.leaves().get(index).copied().ok_or(MerkleError::LeafIndexOutOfBounds {
            index,
            num_leaves: self.num_leaves(),
        })
    }

    /// Returns a Merkle proof for the leaf at the specified index.
    ///
    /// The position flags of the proof are the bits of `index`, least significant first. For a
    /// trailing node that was paired with itself, the sibling is the node itself.
    ///
    /// # Errors
    /// Returns an error if the index is not smaller than the number of leaves.
    pub fn open(&self, index: usize) -> Result<MerkleProof, MerkleError> {
        self.get_leaf(index)?;

        let mut position = index;
        let mut nodes = Vec::with_capacity(self.depth());
        for level in &self.levels[..self.depth()] {
            let sibling = level.get(position ^ 1).unwrap_or(&level[position]);
            nodes.push(PathNode::new(*sibling, position & 1 == 1));
            position >>= 1;
        }

        Ok(MerkleProof::new(nodes))
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Hashes adjacent pairs of `level`, pairing an odd trailing node with itself.
fn build_parent_level(level: &[Felt]) -> Vec<Felt> {
    #[cfg(feature = "concurrent")]
    let parents = level.par_chunks(2).map(hash_pair).collect();

    #[cfg(not(feature = "concurrent"))]
    let parents = level.chunks(2).map(hash_pair).collect();

    parents
}

#[inline(always)]
fn hash_pair(pair: &[Felt]) -> Felt {
    match *pair {
        [left, right] => Poseidon::hash2(left, right),
        [single] => Poseidon::hash2(single, single),
        _ => unreachable!("levels are hashed in chunks of two"),
    }
}
