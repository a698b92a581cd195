#![no_main]

use libfuzzer_sys::fuzz_target;
use poseidon_bn254::abi::{Abi, InputPolicy, Uint256};

fuzz_target!(|data: &[u8]| {
    // The first byte selects the number of flags, the remaining bytes are split into words:
    // root, leaf, then the siblings. Mismatched lengths must be reported, never panic.
    let Some((&num_flags, rest)) = data.split_first() else {
        return;
    };
    let words: Vec<Uint256> = rest
        .chunks_exact(32)
        .map(|chunk| chunk.try_into().unwrap())
        .collect();
    if words.len() < 2 {
        return;
    }
    let (root, leaf, siblings) = (&words[0], &words[1], &words[2..]);
    let flags: Vec<bool> =
        (0..num_flags as usize).map(|i| rest.get(i).is_some_and(|b| b & 1 == 1)).collect();

    let reduce = Abi::new(InputPolicy::Reduce);
    let reject = Abi::new(InputPolicy::Reject);

    let reduced = reduce.verify_merkle_path(root, leaf, siblings, &flags);
    let rejected = reject.verify_merkle_path(root, leaf, siblings, &flags);
    assert!(reduced.is_ok() || siblings.len() != flags.len());
    if let Ok(result) = rejected {
        assert_eq!(reduced, Ok(result));
    }

    let _ = reduce.batch_poseidon(siblings, &words[..siblings.len()]);
});
