use alloc::vec::Vec;
use core::slice;

use winter_utils::{ByteReader, ByteWriter, Deserializable, DeserializationError, Serializable};

use super::{Felt, MerkleError, hash_parent};

// PATH NODE
// ================================================================================================

/// A single level of a Merkle path: the sibling at that level and whether the node being
/// authenticated is the right child.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PathNode {
    pub sibling: Felt,
    pub is_right: bool,
}

impl PathNode {
    pub const fn new(sibling: Felt, is_right: bool) -> Self {
        Self { sibling, is_right }
    }
}

// MERKLE PROOF
// ================================================================================================

/// A path from a leaf to the root of a binary Merkle tree.
///
/// Nodes are ordered from the leaf level upwards; the root itself is not part of the path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MerkleProof {
    nodes: Vec<PathNode>,
}

impl MerkleProof {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Creates a new Merkle proof from a list of path nodes, ordered from the leaf upwards.
    pub fn new(nodes: Vec<PathNode>) -> Self {
        Self { nodes }
    }

    /// Creates a new Merkle proof from position-paired siblings and flags.
    ///
    /// # Errors
    /// Returns an error if `siblings` and `flags` have different lengths.
    pub fn from_parts(siblings: &[Felt], flags: &[bool]) -> Result<Self, MerkleError> {
        if siblings.len() != flags.len() {
            return Err(MerkleError::LengthMismatch {
                siblings: siblings.len(),
                flags: flags.len(),
            });
        }

        Ok(siblings
            .iter()
            .zip(flags)
            .map(|(&sibling, &is_right)| PathNode::new(sibling, is_right))
            .collect())
    }

    // PROVIDERS
    // --------------------------------------------------------------------------------------------

    /// Returns the depth of the path, i.e. the number of levels between the leaf and the root.
    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    /// Returns a reference to the path nodes.
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Returns an iterator over the siblings, from the leaf level upwards.
    pub fn siblings(&self) -> impl ExactSizeIterator<Item = Felt> + '_ {
        self.nodes.iter().map(|node| node.sibling)
    }

    /// Returns an iterator over the position flags, from the leaf level upwards.
    pub fn flags(&self) -> impl ExactSizeIterator<Item = bool> + '_ {
        self.nodes.iter().map(|node| node.is_right)
    }

    /// Returns an iterator over the path nodes.
    pub fn iter(&self) -> slice::Iter<'_, PathNode> {
        self.nodes.iter()
    }

    /// Splits the path into its siblings and position flags.
    pub fn into_parts(self) -> (Vec<Felt>, Vec<bool>) {
        self.nodes.into_iter().map(|node| (node.sibling, node.is_right)).unzip()
    }

    // VERIFICATION
    // --------------------------------------------------------------------------------------------

    /// Computes the root obtained by hashing `leaf` up this path.
    pub fn compute_root(&self, leaf: Felt) -> Felt {
        self.nodes
            .iter()
            .fold(leaf, |current, node| hash_parent(current, node.sibling, node.is_right))
    }

    /// Returns true if hashing `leaf` up this path yields `root`.
    pub fn verify(&self, root: Felt, leaf: Felt) -> bool {
        self.compute_root(leaf) == root
    }

    /// Checks that hashing `leaf` up this path yields `root`.
    ///
    /// # Errors
    /// Returns an error if the computed root differs from `root`.
    pub fn authenticate(&self, root: Felt, leaf: Felt) -> Result<(), MerkleError> {
        let actual_root = self.compute_root(leaf);
        if actual_root != root {
            return Err(MerkleError::ConflictingRoots { expected_root: root, actual_root });
        }
        Ok(())
    }
}

impl From<MerkleProof> for Vec<PathNode> {
    fn from(proof: MerkleProof) -> Self {
        proof.nodes
    }
}

impl FromIterator<PathNode> for MerkleProof {
    fn from_iter<T: IntoIterator<Item = PathNode>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for MerkleProof {
    type Item = PathNode;
    type IntoIter = alloc::vec::IntoIter<PathNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a MerkleProof {
    type Item = &'a PathNode;
    type IntoIter = slice::Iter<'a, PathNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

// SERIALIZATION
// ================================================================================================

impl Serializable for PathNode {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        self.sibling.write_into(target);
        target.write_bool(self.is_right);
    }
}

impl Deserializable for PathNode {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let sibling = Felt::read_from(source)?;
        let is_right = source.read_bool()?;
        Ok(Self::new(sibling, is_right))
    }
}

impl Serializable for MerkleProof {
    fn write_into<W: ByteWriter>(&self, target: &mut W) {
        target.write_usize(self.nodes.len());
        target.write_many(&self.nodes);
    }
}

impl Deserializable for MerkleProof {
    fn read_from<R: ByteReader>(source: &mut R) -> Result<Self, DeserializationError> {
        let depth = source.read_usize()?;
        // depth is untrusted; nodes are read one at a time
        (0..depth).map(|_| PathNode::read_from(source)).collect()
    }
}
