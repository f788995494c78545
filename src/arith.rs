//! Exact arithmetic helpers shared by the cryptosystem and the sharing layer.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Computes the modular multiplicative inverse of `a` modulo `m` using the
/// iterative extended Euclidean algorithm.
///
/// Returns `None` when `gcd(a, m) != 1`, i.e. when no inverse exists. `m`
/// must be nonzero.
pub(crate) fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    let modulus = BigInt::from(m.clone());
    let mut old_r = BigInt::from(a.clone());
    let mut r = modulus.clone();
    let mut old_t = BigInt::one();
    let mut t = BigInt::zero();
    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }
    if old_r.is_one() {
        old_t.mod_floor(&modulus).to_biguint()
    } else {
        None
    }
}

/// Reduces a signed value into the canonical residue range `[0, n)`.
pub(crate) fn to_residue(value: i64, n: &BigUint) -> BigUint {
    let abs = BigUint::from(value.unsigned_abs()) % n;
    if value >= 0 || abs.is_zero() {
        abs
    } else {
        n - abs
    }
}

/// Maps a residue in `[0, n)` back to a signed value: residues above `n/2`
/// represent negative numbers.
pub(crate) fn from_residue(m: &BigUint, n: &BigUint) -> BigInt {
    let half = n >> 1;
    if *m > half {
        BigInt::from(m.clone()) - BigInt::from(n.clone())
    } else {
        BigInt::from(m.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_of_three_mod_eleven() {
        let inv = mod_inverse(&BigUint::from(3u32), &BigUint::from(11u32)).unwrap();
        assert_eq!(inv, BigUint::from(4u32));
    }

    #[test]
    fn inverse_times_value_is_one() {
        let m = BigUint::from(10007u32);
        for a in [2u32, 5, 10, 123, 9999] {
            let a = BigUint::from(a);
            let inv = mod_inverse(&a, &m).unwrap();
            assert_eq!((a * inv) % &m, BigUint::one());
        }
    }

    #[test]
    fn no_inverse_for_non_coprime_values() {
        assert!(mod_inverse(&BigUint::from(6u32), &BigUint::from(9u32)).is_none());
        assert!(mod_inverse(&BigUint::from(0u32), &BigUint::from(7u32)).is_none());
    }

    #[test]
    fn residues_follow_the_signed_convention() {
        let n = BigUint::from(101u32);
        assert_eq!(to_residue(-5, &n), BigUint::from(96u32));
        assert_eq!(to_residue(5, &n), BigUint::from(5u32));
        assert_eq!(to_residue(0, &n), BigUint::from(0u32));
        assert_eq!(from_residue(&BigUint::from(96u32), &n), BigInt::from(-5));
        assert_eq!(from_residue(&BigUint::from(50u32), &n), BigInt::from(50));
        assert_eq!(from_residue(&BigUint::from(51u32), &n), BigInt::from(-50));
    }

    #[test]
    fn residue_roundtrip() {
        let n = BigUint::from(1_000_003u32);
        for value in [-500_000i64, -1, 0, 1, 499_999, 500_001] {
            assert_eq!(from_residue(&to_residue(value, &n), &n), BigInt::from(value));
        }
    }
}
