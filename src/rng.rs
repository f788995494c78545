//! Compatibility wrapper so `num-bigint` can sample from the process RNG.

use rand::{CryptoRng, RngCore, rngs::ThreadRng};

/// Compatibility wrapper between rand_core 0.9 and rand_core 0.6.
///
/// `num-bigint`'s `RandBigInt` is built against the older rand generation;
/// wrapping a version 0.9 RNG in this type makes it usable for big-integer
/// sampling (prime candidates, Miller-Rabin bases, encryption randomizers).
pub(crate) struct RngCompat<R>(pub(crate) R);

impl<R: RngCore> rand_core_0_6::RngCore for RngCompat<R> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest);
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core_0_6::Error> {
        self.0.fill_bytes(dest);
        Ok(())
    }
}

impl<R: CryptoRng> rand_core_0_6::CryptoRng for RngCompat<R> {}

/// The RNG used for all big-integer sampling in this crate.
pub(crate) fn bigint_rng() -> RngCompat<ThreadRng> {
    RngCompat(rand::rng())
}
