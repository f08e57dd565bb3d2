//! Seeded random draws.
//!
//! Randomness in the needs core (skill-factor rolls) goes through [`RngOracle`]
//! so hosts can substitute their own generator and tests can pin outcomes.

/// Seeded uniform random source.
///
/// Given the same seed an implementation must return the same value.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform sample in `[0, 1)`.
    fn unit(&self, seed: u64) -> f32 {
        // 24 high bits fit an f32 mantissa exactly.
        (self.next_u32(seed) >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform sample in `[min, max)`; returns `min` for an empty range.
    fn range_f32(&self, seed: u64, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        min + (max - min) * self.unit(seed)
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Derives a roll seed from the agent seed, a running roll counter and a
/// context discriminant (e.g. the skill being rolled).
pub fn roll_seed(agent_seed: u64, counter: u64, context: u32) -> u64 {
    let mut hash = agent_seed;
    hash ^= counter.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
