//! Additive secret sharing over a fixed modulus.
//!
//! A secret is split into `k` shares that sum to the secret modulo a public
//! modulus. Every proper subset of the shares is uniformly distributed and
//! therefore carries no information about the secret; only the complete set
//! reconstructs it. Signed secrets use the same convention as the
//! cryptosystem: residues above `modulus / 2` represent negative values.

use rand::Rng;

/// Splits `secret` into `num_shares` additive shares over `modulus`.
///
/// The first `num_shares - 1` shares are drawn uniformly from
/// `[0, modulus)`; the final share closes the sum so that all shares add up
/// to `secret` modulo `modulus`. `num_shares` must be at least 1 and
/// `modulus` at least 2.
pub fn share(secret: i64, num_shares: usize, modulus: u64) -> Vec<u64> {
    assert!(num_shares > 0, "cannot split a secret into zero shares");
    let mut rng = rand::rng();
    let mut shares: Vec<u64> = (0..num_shares - 1)
        .map(|_| rng.random_range(0..modulus))
        .collect();
    let partial: u128 = shares.iter().map(|&s| s as u128).sum();
    let residue = (secret as i128).rem_euclid(modulus as i128) as u128;
    let closing = (residue + modulus as u128 - partial % modulus as u128) % modulus as u128;
    shares.push(closing as u64);
    shares
}

/// Reconstructs the secret from a complete set of shares.
///
/// Sums all shares modulo `modulus` and maps the result back to the signed
/// range. Reconstruction is exact for any complete share set, in any order.
pub fn reconstruct(shares: &[u64], modulus: u64) -> i64 {
    let total: u128 = shares.iter().map(|&s| s as u128).sum();
    let value = (total % modulus as u128) as u64;
    if value > modulus / 2 {
        (value as i128 - modulus as i128) as i64
    } else {
        value as i64
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const MODULUS: u64 = 1 << 32;

    #[test]
    fn roundtrip_for_reference_secret() {
        let shares = share(12345, 4, MODULUS);
        assert_eq!(shares.len(), 4);
        assert!(shares.iter().all(|&s| s < MODULUS));
        assert_eq!(reconstruct(&shares, MODULUS), 12345);
    }

    #[test]
    fn roundtrip_for_negative_secret() {
        let shares = share(-987_654, 4, MODULUS);
        assert_eq!(reconstruct(&shares, MODULUS), -987_654);
    }

    #[test]
    fn roundtrip_for_zero() {
        let shares = share(0, 4, MODULUS);
        assert_eq!(reconstruct(&shares, MODULUS), 0);
    }

    #[test]
    fn reconstruction_is_order_independent() {
        let mut shares = share(4242, 4, MODULUS);
        shares.reverse();
        assert_eq!(reconstruct(&shares, MODULUS), 4242);
        shares.swap(0, 2);
        assert_eq!(reconstruct(&shares, MODULUS), 4242);
    }

    #[test]
    fn partial_share_sums_carry_no_signal() {
        // Any 3-of-4 subset should be uniform over the modulus regardless of
        // the secret: the mean of the normalized partial sums must sit near
        // 0.5 for very different secrets (σ ≈ 0.0065 at 2000 trials).
        let mean_for = |secret: i64| -> f64 {
            let trials = 2000;
            let mut acc = 0.0;
            for _ in 0..trials {
                let shares = share(secret, 4, MODULUS);
                let partial: u128 = shares[..3].iter().map(|&s| s as u128).sum();
                acc += (partial % MODULUS as u128) as f64 / MODULUS as f64;
            }
            acc / trials as f64
        };
        let small = mean_for(3);
        let large = mean_for(2_000_000_000);
        assert!((small - 0.5).abs() < 0.05, "partial sums not uniform: {small}");
        assert!((large - 0.5).abs() < 0.05, "partial sums not uniform: {large}");
        assert!(
            (small - large).abs() < 0.1,
            "partial sums correlate with the secret: {small} vs {large}"
        );
    }

    proptest! {
        #[test]
        fn roundtrip_for_arbitrary_secrets(
            secret in -(1i64 << 31) + 1..=1i64 << 31,
            num_shares in 1usize..8,
        ) {
            let shares = share(secret, num_shares, MODULUS);
            prop_assert_eq!(shares.len(), num_shares);
            prop_assert_eq!(reconstruct(&shares, MODULUS), secret);
        }

        #[test]
        fn roundtrip_over_arbitrary_moduli(modulus in 3u64..1 << 48, seed in any::<i64>()) {
            let raw = seed.rem_euclid(modulus as i64);
            let secret = if raw > (modulus / 2) as i64 {
                raw - modulus as i64
            } else {
                raw
            };
            let shares = share(secret, 4, modulus);
            prop_assert_eq!(reconstruct(&shares, modulus), secret);
        }
    }
}
