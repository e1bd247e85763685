//! Seedable 32-bit pseudo-random generator (wyhash32 mixing).
//!
//! Every permutation table shuffle is driven by this generator, so its output
//! sequence is part of the reproducible-seed contract and must not change.

use rand::{RngCore, SeedableRng};

const INCREMENT: u32 = 0xE120_FC15;
const MIX_A: u64 = 0x4A39_B70D;
const MIX_B: u64 = 0x12FA_D5C9;

/// Deterministic 32-bit generator. One instance per session; no global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wyhash32 {
    state: u32,
}

impl Wyhash32 {
    /// Creates a generator whose first draw follows `seed`.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Resets the internal state.
    pub fn seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Returns the next raw 32-bit value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let tmp = u64::from(self.state) * MIX_A;
        let m1 = ((tmp >> 32) ^ tmp) as u32;
        let tmp = u64::from(m1) * MIX_B;
        ((tmp >> 32) ^ tmp) as u32
    }

    /// Uniform float in `[0, 1)`.
    ///
    /// Uses the top 24 bits so the result is exactly representable and never
    /// rounds up to 1.0.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
    }

    /// Integer in the inclusive range `[min, max]`, computed as
    /// `next % (max - min + 1) + min` with wrapping u32 arithmetic.
    ///
    /// The modulo bias is kept on purpose: the permutation shuffle depends on
    /// this exact mapping.
    #[inline]
    pub fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        let span = max.wrapping_sub(min).wrapping_add(1);
        let raw = self.next_u32();
        if span == 0 {
            // full u32 range
            return raw;
        }
        (raw % span).wrapping_add(min)
    }

    /// Float in `[min, max)`.
    #[inline]
    pub fn uniform_float(&mut self, min: f32, max: f32) -> f32 {
        self.next_f32() * (max - min) + min
    }
}

impl Default for Wyhash32 {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RngCore for Wyhash32 {
    fn next_u32(&mut self) -> u32 {
        Wyhash32::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(Wyhash32::next_u32(self));
        let hi = u64::from(Wyhash32::next_u32(self));
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = Wyhash32::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Wyhash32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
