#![no_main]

use libfuzzer_sys::fuzz_target;
use poseidon_bn254::{
    merkle::{MerkleProof, PathNode},
    utils::{Deserializable, Serializable},
};

fuzz_target!(|data: &[u8]| {
    // Test MerkleProof deserialization; anything that decodes must encode back to the same bytes
    if let Ok(proof) = MerkleProof::read_from_bytes(data) {
        let bytes = proof.to_bytes();
        assert_eq!(MerkleProof::read_from_bytes(&bytes).unwrap(), proof);
    }

    // Test Vec<MerkleProof>
    let _ = Vec::<MerkleProof>::read_from_bytes(data);

    // Test Option<MerkleProof>
    let _ = Option::<MerkleProof>::read_from_bytes(data);

    // Test single path nodes
    let _ = PathNode::read_from_bytes(data);
    let _ = <[PathNode; 2]>::read_from_bytes(data);
});
