#![no_main]

use libfuzzer_sys::fuzz_target;
use poseidon_bn254::{
    Felt,
    utils::{Deserializable, Serializable},
};

fuzz_target!(|data: &[u8]| {
    // Binary decoding accepts exactly the canonical encodings
    if let Ok(felt) = Felt::read_from_bytes(data) {
        assert_eq!(felt.to_bytes(), &data[..32]);
    }

    // Reducing decoding never fails and always yields a canonical element
    if let Ok(bytes) = <[u8; 32]>::try_from(data) {
        let reduced = Felt::from_be_bytes_reduced(&bytes);
        assert_eq!(Felt::from_be_bytes(&reduced.to_be_bytes()), Ok(reduced));
    }

    // Textual parsing
    if let Ok(text) = core::str::from_utf8(data) {
        if let Ok(felt) = text.parse::<Felt>() {
            assert_eq!(felt.to_string().parse::<Felt>(), Ok(felt));
        }
    }
});
