//! Randomness seam for confidence jitter.
//!
//! Scorers report `confidence = base + jitter * spread`. Production code draws
//! the jitter from the thread-local generator; tests and the CLI `--seed`
//! flag substitute a deterministic source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of values in `[0, 1)`.
pub trait JitterSource {
    fn next_unit(&mut self) -> f64;
}

/// Draws from `rand::thread_rng()`, so no generator state is shared between threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadJitter;

impl JitterSource for ThreadJitter {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible sequence for a given seed.
#[derive(Clone, Debug)]
pub struct SeededJitter {
    rng: StdRng,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl JitterSource for SeededJitter {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always yields the same value, clamped into `[0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn next_unit(&mut self) -> f64 {
        if self.0.is_nan() {
            return 0.0;
        }
        self.0.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Confidence band a scorer reports in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfidenceBand {
    pub base: f64,
    pub spread: f64,
}

impl ConfidenceBand {
    pub const fn new(base: f64, spread: f64) -> Self {
        Self { base, spread }
    }

    pub fn sample(&self, source: &mut dyn JitterSource) -> f64 {
        self.base + source.next_unit() * self.spread
    }

    pub fn upper(&self) -> f64 {
        self.base + self.spread
    }
}
