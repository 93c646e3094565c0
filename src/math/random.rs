//! Reproducible MT19937 random source
//!
//! Seeding uses the 32-bit `init_genrand` recurrence and floats use the
//! 53-bit construction from two consecutive words, so a given seed yields
//! the same stream as every other MT19937 implementation that does the same.
//!
//! The float and range helpers are generic over [`RngCore`], so callers can
//! draw from any `rand` generator and get `MtRandom` behavior by default.

use crate::io::error::{Result, SnapError};
use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};
use std::fmt;

const STATE_WORDS: usize = 624;
const SHIFT_OFFSET: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;
const INIT_MULTIPLIER: u32 = 1_812_433_253;

const TEMPER_MASK_B: u32 = 0x9d2c_5680;
const TEMPER_MASK_C: u32 = 0xefc6_0000;

// 2^26 and 2^53
const HIGH_WORD_SCALE: f64 = 67_108_864.0;
const FLOAT_DENOMINATOR: f64 = 9_007_199_254_740_992.0;

/// Mersenne Twister generator with 624 words of state
///
/// A fresh instance is created for each quantization call; instances are
/// never shared between invocations.
#[derive(Clone)]
pub struct MtRandom {
    state: [u32; STATE_WORDS],
    cursor: usize,
}

impl MtRandom {
    /// Create a generator from a 32-bit seed
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; STATE_WORDS];
        let mut word = seed;
        for (i, slot) in state.iter_mut().enumerate() {
            if i > 0 {
                word = INIT_MULTIPLIER
                    .wrapping_mul(word ^ (word >> 30))
                    .wrapping_add(i as u32);
            }
            *slot = word;
        }

        Self {
            state,
            cursor: STATE_WORDS,
        }
    }

    // Regenerate all 624 words in place
    fn twist(&mut self) {
        let (low, high) = self.state.split_at_mut(STATE_WORDS - SHIFT_OFFSET);

        // Words 0..227 mix with old words 397..624
        let low_len = low.len();
        for kk in 0..low_len {
            let next = low.get(kk + 1).or_else(|| high.first()).copied();
            let far = high.get(kk + SHIFT_OFFSET - low_len).copied();
            if let (Some(current), Some(next), Some(far)) = (low.get_mut(kk), next, far) {
                *current = mix(*current, next, far);
            }
        }

        // Words 227..623 mix with the new words 0..396
        for kk in 0..high.len() {
            let next = high.get(kk + 1).or_else(|| low.first()).copied();
            let far = if kk < low_len {
                low.get(kk).copied()
            } else {
                high.get(kk - low_len).copied()
            };
            if let (Some(current), Some(next), Some(far)) = (high.get_mut(kk), next, far) {
                *current = mix(*current, next, far);
            }
        }

        self.cursor = 0;
    }

    /// Next tempered 32-bit output word
    pub fn next_word(&mut self) -> u32 {
        if self.cursor >= STATE_WORDS {
            self.twist();
        }

        let mut y = self.state.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;

        y ^= y >> 11;
        y ^= (y << 7) & TEMPER_MASK_B;
        y ^= (y << 15) & TEMPER_MASK_C;
        y ^= y >> 18;
        y
    }

    /// Uniform float in `[0, 1)` with 53 bits of precision
    pub fn random(&mut self) -> f64 {
        unit_float(self)
    }

    /// Uniform integer in `[0, stop)`, computed as `floor(random() * stop)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidRandomRange` if `stop` is not finite or not positive
    pub fn randrange(&mut self, stop: f64) -> Result<usize> {
        index_below(self, stop)
    }
}

const fn mix(current: u32, next: u32, far: u32) -> u32 {
    let y = (current & UPPER_MASK) | (next & LOWER_MASK);
    let mag = if y & 1 == 0 { 0 } else { MATRIX_A };
    far ^ (y >> 1) ^ mag
}

/// Uniform float in `[0, 1)` from two consecutive 32-bit words of `rng`
pub fn unit_float<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    let a = f64::from(rng.next_u32() >> 5);
    let b = f64::from(rng.next_u32() >> 6);
    a.mul_add(HIGH_WORD_SCALE, b) / FLOAT_DENOMINATOR
}

/// Uniform index in `[0, stop)`, computed as `floor(unit_float(rng) * stop)`
///
/// # Errors
///
/// Returns `InvalidRandomRange` if `stop` is not finite or not positive
pub fn index_below<R: RngCore + ?Sized>(rng: &mut R, stop: f64) -> Result<usize> {
    if !stop.is_finite() || stop <= 0.0 {
        return Err(SnapError::InvalidRandomRange { stop });
    }
    Ok((unit_float(rng) * stop).floor() as usize)
}

impl fmt::Debug for MtRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MtRandom")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl RngCore for MtRandom {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst);
    }
}

impl SeedableRng for MtRandom {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
