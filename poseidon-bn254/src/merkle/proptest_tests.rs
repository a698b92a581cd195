use alloc::vec::Vec;

use proptest::prelude::*;
use winter_utils::{Deserializable, Serializable};

use super::{MerkleProof, MerkleTree, PathNode, verify_path};
use crate::{Felt, hash::Poseidon};

/// Maximum depth of randomly generated paths.
const MAX_DEPTH: usize = 32;

fn any_felt() -> impl Strategy<Value = Felt> {
    any::<[u64; 4]>().prop_map(Felt::from_raw)
}

// Arbitrary instance for PathNode
impl Arbitrary for PathNode {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (any_felt(), any::<bool>())
            .prop_map(|(sibling, is_right)| PathNode::new(sibling, is_right))
            .boxed()
    }
}

// Arbitrary instance for MerkleProof
impl Arbitrary for MerkleProof {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        prop::collection::vec(any::<PathNode>(), 0..=MAX_DEPTH)
            .prop_map(MerkleProof::new)
            .boxed()
    }
}

/// Folds the leaf up the path with the 2-to-1 hash, independently of [MerkleProof].
fn fold_root(leaf: Felt, siblings: &[Felt], flags: &[bool]) -> Felt {
    siblings.iter().zip(flags).fold(leaf, |current, (&sibling, &is_right)| {
        if is_right {
            Poseidon::hash2(sibling, current)
        } else {
            Poseidon::hash2(current, sibling)
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn valid_paths_verify(leaf in any_felt(), proof in any::<MerkleProof>()) {
        let (siblings, flags) = proof.clone().into_parts();
        let root = fold_root(leaf, &siblings, &flags);

        prop_assert_eq!(verify_path(root, leaf, &siblings, &flags), Ok(true));
        prop_assert!(proof.verify(root, leaf));
        prop_assert_eq!(proof.compute_root(leaf), root);
    }

    #[test]
    fn mutated_sibling_fails(
        leaf in any_felt(),
        proof in any::<MerkleProof>().prop_filter("non-empty path", |p| p.depth() > 0),
        position in any::<prop::sample::Index>(),
        delta in 1..u64::MAX,
    ) {
        let (mut siblings, flags) = proof.into_parts();
        let root = fold_root(leaf, &siblings, &flags);

        let i = position.index(siblings.len());
        siblings[i] += Felt::from_u64(delta);
        prop_assert_eq!(verify_path(root, leaf, &siblings, &flags), Ok(false));
    }

    #[test]
    fn mutated_flag_fails(
        leaf in any_felt(),
        proof in any::<MerkleProof>().prop_filter("non-empty path", |p| p.depth() > 0),
        position in any::<prop::sample::Index>(),
    ) {
        let (siblings, mut flags) = proof.into_parts();
        let root = fold_root(leaf, &siblings, &flags);

        let i = position.index(flags.len());
        flags[i] = !flags[i];
        prop_assert_eq!(verify_path(root, leaf, &siblings, &flags), Ok(false));
    }

    #[test]
    fn mutated_root_fails(leaf in any_felt(), proof in any::<MerkleProof>(), delta in 1..u64::MAX) {
        let root = proof.compute_root(leaf);
        prop_assert!(!proof.verify(root + Felt::from_u64(delta), leaf));
    }

    #[test]
    fn proof_bytes_decode_to_the_same_proof(proof in any::<MerkleProof>()) {
        let decoded = MerkleProof::read_from_bytes(&proof.to_bytes()).unwrap();
        prop_assert_eq!(decoded, proof);
    }

    #[test]
    fn every_opening_of_a_random_tree_verifies(
        leaves in prop::collection::vec(any_felt(), 1..40),
        position in any::<prop::sample::Index>(),
    ) {
        let tree = MerkleTree::new(&leaves).unwrap();
        let index = position.index(leaves.len());
        let proof = tree.open(index).unwrap();

        prop_assert!(proof.verify(tree.root(), leaves[index]));
        prop_assert_eq!(
            proof.flags().collect::<Vec<_>>(),
            (0..tree.depth()).map(|bit| (index >> bit) & 1 == 1).collect::<Vec<_>>()
        );
    }
}
