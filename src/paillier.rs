//! The Paillier partial homomorphic cryptosystem.
//!
//! Paillier encryption is additively homomorphic: multiplying two ciphertexts
//! yields an encryption of the sum of their plaintexts, and a known plaintext
//! can be folded into a ciphertext without decrypting. This is what lets the
//! protocol accumulate the parties' vectors under encryption.
//!
//! Plaintexts are signed 64-bit integers. A value `m` is reduced into the
//! residue range `[0, n)` before encryption; residues in `[0, n/2]` decrypt
//! to non-negative values and residues in `(n/2, n)` to negative ones, so
//! sums may wrap through zero in either direction and still decrypt exactly.

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::arith::{from_residue, mod_inverse, to_residue};
use crate::primes::generate_prime;
use crate::rng::bigint_rng;

/// Default modulus size in bits for [`Keypair::generate`].
pub const DEFAULT_KEY_BITS: u64 = 512;

/// Errors raised by key generation and decryption.
#[derive(Debug, Error)]
pub enum Error {
    /// λ has no inverse modulo n. This cannot happen for a modulus built
    /// from two distinct primes and signals a broken key generation run.
    #[error("λ has no inverse modulo n, key generation is broken")]
    NoModularInverse,
    /// The decrypted value does not fit the supported plaintext range.
    #[error("decrypted plaintext does not fit into an i64")]
    PlaintextOutOfRange,
}

/// The public half of a Paillier key pair, shared with every party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    n: BigUint,
    g: BigUint,
    n_sq: BigUint,
}

/// The private half of a Paillier key pair. Never leaves the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    lambda: BigUint,
    mu: BigUint,
}

/// A Paillier ciphertext: an opaque value in `[0, n²)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext(BigUint);

/// A freshly generated public/private key pair.
#[derive(Debug, Clone)]
pub struct Keypair {
    /// The shared encryption key.
    pub public: PublicKey,
    /// The coordinator's decryption key.
    pub private: PrivateKey,
}

impl Keypair {
    /// Generates a key pair with a `bits`-bit modulus from two independent
    /// `bits/2`-bit primes.
    ///
    /// `λ = lcm(p-1, q-1)` and `μ = λ⁻¹ mod n`; the inverse exists for every
    /// well-formed two-prime modulus, so a missing inverse is reported as the
    /// internal error [`Error::NoModularInverse`] rather than retried.
    pub fn generate(bits: u64) -> Result<Self, Error> {
        let p = generate_prime(bits / 2);
        let mut q = generate_prime(bits / 2);
        while q == p {
            q = generate_prime(bits / 2);
        }
        let n = &p * &q;
        let n_sq = &n * &n;
        let g = &n + 1u32;
        let lambda = (&p - 1u32).lcm(&(&q - 1u32));
        let mu = mod_inverse(&lambda, &n).ok_or(Error::NoModularInverse)?;
        debug!(bits, "generated Paillier keypair");
        Ok(Keypair {
            public: PublicKey { n, g, n_sq },
            private: PrivateKey { lambda, mu },
        })
    }
}

impl PublicKey {
    /// The modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Encrypts a signed plaintext.
    ///
    /// Draws a fresh randomizer `r ∈ [1, n-1]` coprime to `n` (non-units are
    /// redrawn) and returns `g^m · r^n mod n²`, so encrypting the same value
    /// twice yields different ciphertexts.
    pub fn encrypt(&self, plaintext: i64) -> Ciphertext {
        let m = to_residue(plaintext, &self.n);
        let mut rng = bigint_rng();
        let r = loop {
            let r = rng.gen_biguint_range(&BigUint::one(), &self.n);
            if r.gcd(&self.n).is_one() {
                break r;
            }
        };
        let c = (self.g.modpow(&m, &self.n_sq) * r.modpow(&self.n, &self.n_sq)) % &self.n_sq;
        Ciphertext(c)
    }

    /// Homomorphic addition: multiplying ciphertexts adds their plaintexts.
    pub fn add_encrypted(&self, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext {
        Ciphertext((&c1.0 * &c2.0) % &self.n_sq)
    }

    /// Adds a known plaintext to a ciphertext without decrypting it.
    pub fn add_plaintext(&self, c: &Ciphertext, plaintext: i64) -> Ciphertext {
        let m = to_residue(plaintext, &self.n);
        Ciphertext((&c.0 * self.g.modpow(&m, &self.n_sq)) % &self.n_sq)
    }
}

impl PrivateKey {
    /// Decrypts a ciphertext back to its signed plaintext.
    ///
    /// Computes `m = L(c^λ mod n²) · μ mod n` with `L(x) = (x-1)/n` and maps
    /// the residue back to the signed range.
    pub fn decrypt(&self, public: &PublicKey, c: &Ciphertext) -> Result<i64, Error> {
        let x = c.0.modpow(&self.lambda, &public.n_sq);
        let l = (x - 1u32) / &public.n;
        let m = (l * &self.mu) % &public.n;
        from_residue(&m, &public.n)
            .to_i64()
            .ok_or(Error::PlaintextOutOfRange)
    }
}
