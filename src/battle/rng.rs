use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Injectable source of randomness for everything the engine rolls.
///
/// `reason` names the draw; scripted sources use it to report exhaustion.
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn next_in_range(&mut self, low: u32, high: u32, reason: &str) -> u32;
}

/// Production source backed by a seedable `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: StdRng,
}

impl SeededRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRng {
    fn next_in_range(&mut self, low: u32, high: u32, _reason: &str) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

/// Scripted source for tests. Values outside the requested range are clamped into it.
#[derive(Debug, Clone)]
pub struct TurnRng {
    outcomes: Vec<u32>,
    index: usize,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self { outcomes, index: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len() - self.index
    }

    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl RandomSource for TurnRng {
    fn next_in_range(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        if self.index >= self.outcomes.len() {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = self.outcomes[self.index].clamp(low, high.max(low));

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        self.index += 1;
        outcome
    }
}
