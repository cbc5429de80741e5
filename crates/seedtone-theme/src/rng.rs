// SPDX-License-Identifier: MIT
//! Seeded randomness — FNV-1a string hashing feeding a mulberry32 stream.
//!
//! Every generator in this crate derives its own [`Mulberry32`] from a
//! distinct key string (`seed|palette|mode|mood`, `seed|fonts|mood`), so
//! palette and font draws never share a stream position. No external
//! `rand` crate: the exact sequence is part of the output contract.

/// FNV-1a 32-bit hash over the UTF-8 bytes of `s`.
///
/// Offset basis `0x811c9dc5`, prime `0x01000193`.
#[must_use]
pub fn fnv1a(s: &str) -> u32 {
    s.bytes().fold(0x811c_9dc5u32, |h, b| {
        (h ^ u32::from(b)).wrapping_mul(0x0100_0193)
    })
}

// ---------------------------------------------------------------------------
// Mulberry32
// ---------------------------------------------------------------------------

/// Minimal deterministic PRNG with a 32-bit state.
///
/// Same seed, same infinite sequence. Draws are uniform in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seed from a string key via [`fnv1a`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::new(fnv1a(key))
    }

    /// Advance and return the next raw 32-bit output.
    pub const fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let mut x = self.state;
        x = (x ^ (x >> 15)).wrapping_mul(x | 1);
        x ^= x.wrapping_add((x ^ (x >> 7)).wrapping_mul(x | 61));
        x ^ (x >> 14)
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform integer in `[min, max]`, inclusive on both ends.
    #[allow(clippy::cast_possible_truncation)]
    pub fn int_in(&mut self, min: i32, max: i32) -> i32 {
        let span = f64::from(max) - f64::from(min) + 1.0;
        // floor(r * span) < span, so the sum stays within [min, max].
        (self.next_f64() * span).floor() as i32 + min
    }

    /// Uniform float in `[min, max)`.
    pub fn float_in(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64().mul_add(max - min, min)
    }

    /// Pick a uniformly random element from a slice.
    ///
    /// # Panics
    ///
    /// Panics if `slice` is empty.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn pick<'a, T>(&mut self, slice: &'a [T]) -> &'a T {
        let idx = (self.next_f64() * slice.len() as f64).floor() as usize;
        &slice[idx.min(slice.len() - 1)]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
