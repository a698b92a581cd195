use alloc::{string::ToString, vec::Vec};

use num::{BigUint, One, Zero};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use winter_utils::{Deserializable, Serializable};

use super::Felt;
use crate::FieldError;

const MODULUS_DEC: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

fn modulus() -> BigUint {
    BigUint::parse_bytes(MODULUS_DEC.as_bytes(), 10).unwrap()
}

fn p_minus(k: u64) -> Felt {
    -Felt::from_u64(k)
}

fn limbs_of(value: &BigUint) -> [u64; 4] {
    let digits = value.to_u64_digits();
    let mut limbs = [0u64; 4];
    limbs[..digits.len()].copy_from_slice(&digits);
    limbs
}

prop_compose! {
    fn any_felt()(limbs in any::<[u64; 4]>()) -> Felt {
        Felt::from_raw(limbs)
    }
}

// DIFFERENTIAL TESTS AGAINST BIG INTEGER ARITHMETIC
// ================================================================================================

proptest! {
    /// `from_raw` reduces any 256-bit integer modulo p.
    #[test]
    fn from_raw_reduces(limbs in any::<[u64; 4]>()) {
        let raw = limbs
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, &l| (acc << 64u32) + BigUint::from(l));
        let felt = Felt::from_raw(limbs);
        prop_assert_eq!(felt.as_canonical_biguint(), raw % modulus());
    }

    /// Field operations match big integer arithmetic reduced modulo p.
    #[test]
    fn arithmetic_matches_biguint(a in any_felt(), b in any_felt()) {
        let p = modulus();
        let (x, y) = (a.as_canonical_biguint(), b.as_canonical_biguint());

        prop_assert_eq!((a + b).as_canonical_biguint(), (&x + &y) % &p);
        prop_assert_eq!((a - b).as_canonical_biguint(), (&x + &p - &y) % &p);
        prop_assert_eq!((a * b).as_canonical_biguint(), (&x * &y) % &p);
        prop_assert_eq!((-a).as_canonical_biguint(), (&p - &x) % &p);
        prop_assert_eq!(a.exp5().as_canonical_biguint(), x.modpow(&BigUint::from(5u32), &p));
    }

    #[test]
    fn exp_u64_matches_biguint(a in any_felt(), power in any::<u64>()) {
        let p = modulus();
        let expected = a.as_canonical_biguint().modpow(&BigUint::from(power), &p);
        prop_assert_eq!(a.exp_u64(power).as_canonical_biguint(), expected);
    }

    #[test]
    fn byte_encoding_is_canonical(a in any_felt()) {
        let bytes = a.to_be_bytes();
        prop_assert_eq!(Felt::from_be_bytes(&bytes), Ok(a));
        prop_assert_eq!(Felt::from_be_bytes_reduced(&bytes), a);
        prop_assert_eq!(BigUint::from_bytes_be(&bytes), a.as_canonical_biguint());
    }

    #[test]
    fn string_encodings_parse_back(a in any_felt()) {
        prop_assert_eq!(a.to_string().parse::<Felt>(), Ok(a));
        prop_assert_eq!(a.as_canonical_biguint().to_string().parse::<Felt>(), Ok(a));
    }
}

// BOUNDARY CASES
// ================================================================================================

#[test]
fn modulus_limbs_match_decimal_modulus() {
    assert_eq!(limbs_of(&modulus()), Felt::MODULUS);
    assert_eq!(modulus().bits(), Felt::NUM_BITS as u64);
}

#[test]
fn identities() {
    assert!(Felt::ZERO.is_zero());
    assert_eq!(Felt::ONE.to_canonical_limbs(), [1, 0, 0, 0]);
    assert_eq!(Felt::from_u64(0), Felt::ZERO);
    assert_eq!(Felt::from_u64(1), Felt::ONE);
    assert_eq!(Felt::default(), Felt::ZERO);
    assert_eq!(Felt::from(true), Felt::ONE);
    assert_eq!(Felt::from(false), Felt::ZERO);
}

#[test]
fn addition_wraps_at_modulus() {
    assert_eq!(Felt::from_u64(100) + Felt::from_u64(200), Felt::from_u64(300));
    assert_eq!(p_minus(1) + Felt::from_u64(2), Felt::ONE);
    assert_eq!(p_minus(1) + Felt::ONE, Felt::ZERO);
    assert_eq!(p_minus(1).double(), p_minus(2));
}

#[test]
fn subtraction_wraps_at_zero() {
    assert_eq!(Felt::from_u64(200) - Felt::from_u64(100), Felt::from_u64(100));
    assert_eq!(Felt::from_u64(100) - Felt::from_u64(200), p_minus(100));
    assert_eq!(-Felt::ZERO, Felt::ZERO);
}

#[test]
fn multiplication_reduces() {
    assert_eq!(Felt::from_u64(7) * Felt::from_u64(8), Felt::from_u64(56));
    // (p - 1) * 2 = 2p - 2 = p - 2 (mod p)
    assert_eq!(p_minus(1) * Felt::from_u64(2), p_minus(2));
    // (p - 1)^2 = 1 (mod p)
    assert_eq!(p_minus(1).square(), Felt::ONE);
    // (2^64)^4 = 2^256 exercises the double-width product
    let two_64 = Felt::from_raw([0, 1, 0, 0]);
    let expected = (BigUint::one() << 256u32) % modulus();
    assert_eq!(two_64.exp_u64(4).as_canonical_biguint(), expected);
}

#[test]
fn exp5_is_repeated_multiplication() {
    let x = Felt::from_u64(3);
    assert_eq!(x.exp5(), Felt::from_u64(243));
    assert_eq!(p_minus(1).exp5(), p_minus(1));
    assert_eq!(Felt::ZERO.exp5(), Felt::ZERO);
    assert_eq!(x.exp_u64(0), Felt::ONE);
}

#[test]
fn sum_and_product() {
    let values: Vec<Felt> = (1..=5u64).map(Felt::from_u64).collect();
    assert_eq!(values.iter().copied().sum::<Felt>(), Felt::from_u64(15));
    assert_eq!(values.iter().copied().product::<Felt>(), Felt::from_u64(120));
}

#[test]
fn out_of_range_inputs_are_rejected_or_reduced() {
    let p = Felt::MODULUS;
    assert_eq!(Felt::from_canonical_limbs(p), Err(FieldError::OutOfRange));
    assert_eq!(Felt::from_raw(p), Felt::ZERO);

    let mut p_plus_one = p;
    p_plus_one[0] += 1;
    assert_eq!(Felt::from_raw(p_plus_one), Felt::ONE);

    let max = [0xff; 32];
    assert_eq!(Felt::from_be_bytes(&max), Err(FieldError::OutOfRange));
    let expected = ((BigUint::one() << 256u32) - BigUint::one()) % modulus();
    assert_eq!(Felt::from_be_bytes_reduced(&max).as_canonical_biguint(), expected);

    assert_eq!(Felt::from_biguint(&modulus()), Err(FieldError::OutOfRange));
    assert_eq!(Felt::from_biguint(&(modulus() - BigUint::one())), Ok(p_minus(1)));
}

#[test]
fn parsing() {
    assert_eq!("0x2a".parse::<Felt>(), Ok(Felt::from_u64(42)));
    assert_eq!("42".parse::<Felt>(), Ok(Felt::from_u64(42)));
    assert_eq!(MODULUS_DEC.parse::<Felt>(), Err(FieldError::OutOfRange));
    assert!(matches!("".parse::<Felt>(), Err(FieldError::InvalidDecimal(_))));
    assert!(matches!("-1".parse::<Felt>(), Err(FieldError::InvalidDecimal(_))));
    assert!(matches!("0xzz".parse::<Felt>(), Err(FieldError::InvalidHex(_))));
    assert!(matches!(Felt::try_from("12a"), Err(FieldError::InvalidDecimal(_))));
}

#[test]
fn display_is_padded_hex() {
    assert_eq!(
        Felt::from_u64(255).to_string(),
        "0x00000000000000000000000000000000000000000000000000000000000000ff"
    );
    assert_eq!(
        format!("{:?}", p_minus(1)),
        "0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000000"
    );
}

#[test]
fn serialization() {
    let value = Felt::from_u64(0x0102);
    let bytes = value.to_bytes();
    assert_eq!(bytes.len(), Felt::ELEMENT_BYTES);
    assert_eq!(&bytes[30..], &[0x01, 0x02]);
    assert_eq!(Felt::read_from_bytes(&bytes).unwrap(), value);

    // the modulus itself is not a valid encoding
    let mut modulus_bytes = [0u8; 32];
    modulus_bytes.copy_from_slice(&modulus().to_bytes_be());
    assert!(Felt::read_from_bytes(&modulus_bytes).is_err());

    // truncated input
    assert!(Felt::read_from_bytes(&bytes[..31]).is_err());
}

#[test]
fn random_elements_are_canonical_and_distinct() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let values: Vec<Felt> = (0..64).map(|_| rng.random()).collect();
    for value in values.iter() {
        assert_eq!(Felt::from_canonical_limbs(value.to_canonical_limbs()), Ok(*value));
    }
    assert!(values.windows(2).all(|w| w[0] != w[1]));
}

#[cfg(feature = "serde")]
#[test]
fn serde_uses_padded_hex_strings() {
    let value = Felt::from_u64(0x0102);
    let json = serde_json::to_string(&value).unwrap();
    assert_eq!(json, "\"0x0000000000000000000000000000000000000000000000000000000000000102\"");
    assert_eq!(serde_json::from_str::<Felt>(&json).unwrap(), value);

    let max = p_minus(1);
    assert_eq!(serde_json::from_str::<Felt>(&serde_json::to_string(&max).unwrap()).unwrap(), max);

    assert_eq!(serde_json::from_str::<Felt>("\"258\"").unwrap(), value);
    assert!(serde_json::from_str::<Felt>(&format!("\"{MODULUS_DEC}\"")).is_err());
    assert!(serde_json::from_str::<Felt>("\"0xzz\"").is_err());
}
