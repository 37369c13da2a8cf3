//! Random draws used by the productions.
//!
//! Every helper takes the caller's generator explicitly so a derivation can be
//! replayed from a seed.
use rand::RngCore;

pub mod scatter;

pub use scatter::CircleScatter;

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Uniform index in `0..len`. `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(len: usize, rng: &mut dyn RngCore) -> usize {
    debug_assert!(len > 0, "rand_index needs a non-empty range");
    ((rng.next_u32() as u64 * len as u64) >> 32) as usize
}

/// Uniform integer in the inclusive range `lo..=hi`. Returns `lo` when the
/// range is empty.
#[inline]
pub(crate) fn rand_int(lo: i32, hi: i32, rng: &mut dyn RngCore) -> i32 {
    if hi <= lo {
        return lo;
    }
    let span = (hi as i64 - lo as i64 + 1) as u64;
    lo + ((rng.next_u32() as u64 * span) >> 32) as i32
}

/// True with probability `p`.
#[inline]
pub(crate) fn chance(p: f32, rng: &mut dyn RngCore) -> bool {
    rand01(rng) < p
}
