//! Miller-Rabin primality testing and random prime generation.

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;

use crate::rng::bigint_rng;

/// Number of Miller-Rabin rounds used during prime generation. Each round
/// has a false-positive probability of at most 1/4.
pub(crate) const MILLER_RABIN_ROUNDS: u32 = 5;

/// Probabilistic primality test (Miller-Rabin).
///
/// Numbers below 2 and even numbers above 2 are rejected outright; 2 and 3
/// are accepted. Otherwise `n - 1` is decomposed as `2^r * d` with `d` odd
/// and `rounds` random bases in `[2, n - 2]` are tested.
pub(crate) fn is_probable_prime(n: &BigUint, rounds: u32) -> bool {
    let two = BigUint::from(2u32);
    let three = BigUint::from(3u32);
    if *n < two {
        return false;
    }
    if *n == two || *n == three {
        return true;
    }
    if n.is_even() {
        return false;
    }

    let n_minus_one = n - 1u32;
    let mut d = n_minus_one.clone();
    let mut r = 0u32;
    while d.is_even() {
        d >>= 1;
        r += 1;
    }

    let mut rng = bigint_rng();
    'rounds: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue 'rounds;
        }
        for _ in 1..r {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'rounds;
            }
        }
        return false;
    }
    true
}

/// Generates a random probable prime with exactly `bits` bits.
///
/// The top and bottom bits of each candidate are forced to 1, guaranteeing
/// the requested bit length and oddness; candidates are redrawn until one
/// passes the primality test. `bits` must be at least 2.
pub(crate) fn generate_prime(bits: u64) -> BigUint {
    debug_assert!(bits >= 2);
    let forced_bits = (BigUint::one() << (bits - 1)) | BigUint::one();
    let mut rng = bigint_rng();
    loop {
        let candidate = rng.gen_biguint(bits) | &forced_bits;
        if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS) {
            return candidate;
        }
    }
}
