//! The four-phase secure sum-and-maximum protocol.
//!
//! # Protocol Workflow
//!
//! 1. Key generation: the coordinator generates a Paillier key pair; the
//!    public key becomes shared read-only state, the private key stays with
//!    the coordinator.
//! 2. Homomorphic accumulation: in contribution order, every party encrypts
//!    its vector element-wise and folds it into the running encrypted sum.
//!    No plaintext sum is ever formed in this phase.
//! 3. Share distribution: the coordinator decrypts the accumulated sum and
//!    immediately splits every element into four additive shares, assigning
//!    one slice per party. Afterwards, reconstructing the sum requires all
//!    four slices.
//! 4. Secure maximum: the share slices are combined position-wise and the
//!    maximum element of the reconstructed sum is the protocol output.
//!
//! Phases run strictly in order; each phase checks that its prerequisite
//! state has been populated and fails otherwise. The phase methods take
//! `&mut self`, so the protocol state can never be mutated concurrently.
//!
//! Progress is reported as `tracing` debug events; verbosity is entirely a
//! concern of whatever subscriber the embedding application installs.

use tracing::{Level, debug, instrument};

use crate::paillier::{self, Ciphertext, DEFAULT_KEY_BITS, Keypair};
use crate::party::{Party, PartyId};
use crate::sharing;

/// Modulus for the additive share arithmetic.
///
/// Fixed at `2^32` regardless of input magnitude: element-wise sums outside
/// `(-2^31, 2^31]` wrap silently during share reconstruction. Inputs beyond
/// that range need a wider modulus, which this protocol deliberately does
/// not provide.
pub const SHARE_MODULUS: u64 = 1 << 32;

const NUM_PARTIES: usize = 4;

/// A custom error type for protocol construction and phase execution.
#[derive(Debug)]
pub enum Error {
    /// The four input vectors do not all have the same length.
    VectorLengthMismatch {
        /// The party whose vector length differs from the coordinator's.
        party: PartyId,
        /// The coordinator's vector length, which every party must match.
        expected: usize,
        /// The differing length.
        actual: usize,
    },
    /// The input vectors are empty.
    EmptyVectors,
    /// Key generation has not run yet.
    KeyPairMissing,
    /// No encrypted sum has been accumulated yet.
    EncryptedSumMissing,
    /// Shares have not been distributed yet.
    SharesMissing,
    /// An error raised by the Paillier cryptosystem.
    Paillier(paillier::Error),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::VectorLengthMismatch {
                party,
                expected,
                actual,
            } => write!(
                f,
                "{} supplied a vector of length {actual}, expected {expected}",
                party.name()
            ),
            Error::EmptyVectors => f.write_str("input vectors must not be empty"),
            Error::KeyPairMissing => f.write_str("key generation has not run yet"),
            Error::EncryptedSumMissing => f.write_str("no encrypted sum has been accumulated yet"),
            Error::SharesMissing => f.write_str("shares have not been distributed yet"),
            Error::Paillier(e) => write!(f, "Paillier error: {e}"),
        }
    }
}

impl From<paillier::Error> for Error {
    fn from(e: paillier::Error) -> Self {
        Error::Paillier(e)
    }
}

/// Orchestrates the four protocol phases over the four parties' vectors.
///
/// The cross-phase state (key pair, encrypted sum, decrypted sum) that a
/// distributed deployment would keep compartmentalized per party is owned
/// here in one place; the phase methods are the only way to mutate it.
#[derive(Debug)]
pub struct Protocol {
    parties: [Party; NUM_PARTIES],
    vector_len: usize,
    keypair: Option<Keypair>,
    encrypted_sum: Option<Vec<Ciphertext>>,
    // Retained for post-run verification only, never disclosed.
    sum_vector: Option<Vec<i64>>,
}

impl Protocol {
    /// Creates the protocol over the four parties' private vectors.
    ///
    /// All vectors must have the same nonzero length.
    pub fn new(
        alice: Vec<i64>,
        bob: Vec<i64>,
        chris: Vec<i64>,
        david: Vec<i64>,
    ) -> Result<Self, Error> {
        let vector_len = alice.len();
        for (party, vector) in [
            (PartyId::Bob, &bob),
            (PartyId::Chris, &chris),
            (PartyId::David, &david),
        ] {
            if vector.len() != vector_len {
                return Err(Error::VectorLengthMismatch {
                    party,
                    expected: vector_len,
                    actual: vector.len(),
                });
            }
        }
        if vector_len == 0 {
            return Err(Error::EmptyVectors);
        }
        Ok(Protocol {
            parties: [
                Party::new(PartyId::Alice, alice),
                Party::new(PartyId::Bob, bob),
                Party::new(PartyId::Chris, chris),
                Party::new(PartyId::David, david),
            ],
            vector_len,
            keypair: None,
            encrypted_sum: None,
            sum_vector: None,
        })
    }

    /// The common length of the parties' vectors.
    pub fn vector_len(&self) -> usize {
        self.vector_len
    }

    /// The given party's state.
    pub fn party(&self, id: PartyId) -> &Party {
        &self.parties[id.index()]
    }

    /// Phase 1: the coordinator generates the Paillier key pair.
    #[instrument(level = Level::DEBUG, skip_all, err)]
    pub fn phase1_key_generation(&mut self) -> Result<(), Error> {
        debug!(
            party = PartyId::Alice.name(),
            bits = DEFAULT_KEY_BITS,
            "generating Paillier keypair"
        );
        self.keypair = Some(Keypair::generate(DEFAULT_KEY_BITS)?);
        Ok(())
    }

    /// Phase 2: each party encrypts its vector element-wise and folds it
    /// into the running encrypted sum, in the fixed contribution order.
    #[instrument(level = Level::DEBUG, skip_all, err)]
    pub fn phase2_homomorphic_accumulation(&mut self) -> Result<(), Error> {
        let keypair = self.keypair.as_ref().ok_or(Error::KeyPairMissing)?;
        let public = &keypair.public;
        let [first, rest @ ..] = &self.parties;
        debug!(
            party = first.id().name(),
            "encrypting vector to start the running sum"
        );
        let mut encrypted_sum: Vec<Ciphertext> =
            first.vector().iter().map(|&v| public.encrypt(v)).collect();
        for party in rest {
            debug!(
                party = party.id().name(),
                "folding encrypted vector into the running sum"
            );
            for (acc, &v) in encrypted_sum.iter_mut().zip(party.vector()) {
                *acc = public.add_encrypted(acc, &public.encrypt(v));
            }
        }
        self.encrypted_sum = Some(encrypted_sum);
        Ok(())
    }

    /// Phase 3: the coordinator decrypts the accumulated sum and deals one
    /// additive share slice to every party.
    ///
    /// The plaintext sum exists only transiently inside this phase; after it
    /// completes, no single party's state suffices to reconstruct it.
    #[instrument(level = Level::DEBUG, skip_all, err)]
    pub fn phase3_share_distribution(&mut self) -> Result<(), Error> {
        let keypair = self.keypair.as_ref().ok_or(Error::KeyPairMissing)?;
        let encrypted_sum = self
            .encrypted_sum
            .as_ref()
            .ok_or(Error::EncryptedSumMissing)?;

        debug!(
            party = PartyId::Alice.name(),
            "decrypting the accumulated sum vector"
        );
        let mut sum_vector = Vec::with_capacity(self.vector_len);
        for c in encrypted_sum {
            sum_vector.push(keypair.private.decrypt(&keypair.public, c)?);
        }

        debug!("splitting each element into {NUM_PARTIES} shares");
        let mut slices: [Vec<u64>; NUM_PARTIES] =
            std::array::from_fn(|_| Vec::with_capacity(self.vector_len));
        for &value in &sum_vector {
            let shares = sharing::share(value, NUM_PARTIES, SHARE_MODULUS);
            for (slice, share) in slices.iter_mut().zip(shares) {
                slice.push(share);
            }
        }
        for (party, slice) in self.parties.iter_mut().zip(slices) {
            party.set_shares(slice);
        }
        self.sum_vector = Some(sum_vector);
        Ok(())
    }

    /// Phase 4: reconstructs the sum position-wise from all four share
    /// slices and returns its maximum element together with the
    /// reconstructed vector.
    ///
    /// Only the maximum is protocol output; the reconstructed vector exists
    /// for verification tooling and must not be surfaced by ordinary
    /// callers. Ties return the value without the attaining position. The
    /// reconstruction is a direct plaintext computation standing in for an
    /// oblivious maximum circuit (see the crate-level notes).
    #[instrument(level = Level::DEBUG, skip_all, err)]
    pub fn phase4_secure_maximum(&self) -> Result<(i64, Vec<i64>), Error> {
        let mut slices = Vec::with_capacity(NUM_PARTIES);
        for party in &self.parties {
            slices.push(party.shares().ok_or(Error::SharesMissing)?);
        }
        let mut reconstructed = Vec::with_capacity(self.vector_len);
        for i in 0..self.vector_len {
            let shares: Vec<u64> = slices.iter().map(|slice| slice[i]).collect();
            reconstructed.push(sharing::reconstruct(&shares, SHARE_MODULUS));
        }
        let maximum = reconstructed.iter().copied().fold(i64::MIN, i64::max);
        debug!(maximum, "maximum of the summed vector determined");
        Ok((maximum, reconstructed))
    }

    /// Runs phases 1 through 4 and returns the maximum together with the
    /// reconstructed sum vector.
    ///
    /// The second component exists for verification tooling; ordinary
    /// callers must surface only the maximum.
    pub fn run_protocol(&mut self) -> Result<(i64, Vec<i64>), Error> {
        self.phase1_key_generation()?;
        self.phase2_homomorphic_accumulation()?;
        self.phase3_share_distribution()?;
        self.phase4_secure_maximum()
    }

    /// The sum vector the coordinator decrypted in phase 3, if that phase
    /// has run.
    ///
    /// Verification tooling only, like [`Protocol::verify_correctness`]: the
    /// protocol never discloses this value.
    pub fn decrypted_sum(&self) -> Option<&[i64]> {
        self.sum_vector.as_deref()
    }

    /// Recomputes the element-wise sum and its maximum directly from the
    /// four raw vectors, bypassing the protocol entirely.
    ///
    /// Verification tooling only: this reads every party's private vector,
    /// which only the in-process orchestrator can do, and must never be
    /// used as an output path of the protocol itself.
    pub fn verify_correctness(&self) -> (Vec<i64>, i64) {
        let mut actual_sum = vec![0i64; self.vector_len];
        for party in &self.parties {
            for (acc, &v) in actual_sum.iter_mut().zip(party.vector()) {
                *acc += v;
            }
        }
        let actual_max = actual_sum.iter().copied().fold(i64::MIN, i64::max);
        (actual_sum, actual_max)
    }
}
