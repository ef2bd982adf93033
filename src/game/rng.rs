//! Random number providers for roll resolution.
//!
//! Every random draw the engine makes goes through `RollRng`, so a session
//! can run on a seeded ChaCha stream in production and on a scripted
//! sequence in tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform draws for the roll engine.
pub trait RollRng {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Six-sided die face in `1..=6`.
    fn roll_die(&mut self) -> u8 {
        let face = (self.next_unit() * 6.0).floor() as u8;
        face.min(5) + 1
    }

    /// Uniform value in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }
}

/// ChaCha8-backed provider used by live sessions.
#[derive(Debug, Clone)]
pub struct SeededRng(ChaCha8Rng);

impl SeededRng {
    /// Reproducible stream: the same seed replays the same game.
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

impl RollRng for SeededRng {
    fn next_unit(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }

    fn roll_die(&mut self) -> u8 {
        self.0.gen_range(1..=6)
    }
}

/// Replays a fixed list of unit draws, cycling when exhausted.
///
/// Values are returned as given; callers are expected to script values in
/// `[0, 1)`. An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    values: Vec<f64>,
    index: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, index: 0 }
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl RollRng for SequenceRng {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.index += 1;
            return 0.0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
