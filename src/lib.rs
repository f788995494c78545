//! Secure four-party computation of the maximum element of a vector sum.
//!
//! Four parties (Alice, Bob, Chris and David), each holding a private integer
//! vector of the same length, jointly determine the maximum element of the
//! element-wise sum of their vectors. No party learns another party's vector
//! or the sum vector itself; only the final maximum is disclosed.
//!
//! ## Main Components
//!
//! * [`protocol`]: The four-phase [`protocol::Protocol`] state machine that
//!   drives the computation.
//! * [`paillier`]: The partial homomorphic cryptosystem used to accumulate
//!   the sum under encryption.
//! * [`sharing`]: Additive secret sharing used to distribute the decrypted
//!   sum across the parties.
//! * [`party`]: Party identities, roles and per-party state.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use summax::protocol::Protocol;
//!
//! # fn main() -> Result<(), summax::protocol::Error> {
//! let mut protocol = Protocol::new(
//!     vec![1, 2, 3],
//!     vec![4, 5, 6],
//!     vec![7, 8, 9],
//!     vec![1, 1, 1],
//! )?;
//! let (maximum, _sum) = protocol.run_protocol()?;
//! println!("maximum of the summed vectors: {maximum}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Security Properties
//!
//! The element-wise sum is only ever handled under Paillier encryption or as
//! additive shares; the transient plaintext exists exclusively inside the
//! coordinator's share-dealing step. After share distribution, reconstructing
//! the sum requires all four share slices, and any three of them are
//! information-theoretically independent of it.
//!
//! Known limitation: the final phase reconstructs the shared sum directly and
//! takes a plaintext maximum. It simulates the oblivious maximum computation
//! a hardened deployment would use; upgrading it to a genuinely oblivious
//! protocol would change the security model and is deliberately out of scope.
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod paillier;
pub mod party;
pub mod protocol;
pub mod sharing;

mod arith;
mod primes;
mod rng;
