//! Random source used for action selection
//!
//! The policy shuffles and samples to avoid repeating the same prompt every
//! session. Everything random goes through [`RandomSource`] so tests can pin
//! the outcome with [`FixedOrder`] or a seeded [`StdRandom`].

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Shuffle, choice and sampling over slices
pub trait RandomSource: Send {
    /// Permute `items` in place
    fn shuffle<T>(&mut self, items: &mut [T]);

    /// Pick one element, `None` for an empty slice
    fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>;

    /// Pick `amount` distinct elements (fewer if the slice is shorter)
    fn sample<T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T>;
}

/// `StdRng`-backed random source
#[derive(Debug, Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Seed from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandom {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    fn sample<T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        items
            .choose_multiple(&mut self.rng, amount)
            .cloned()
            .collect()
    }
}

/// Deterministic source: shuffling keeps the order, choice and sample take
/// from the front
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedOrder;

impl RandomSource for FixedOrder {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}

    fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.first()
    }

    fn sample<T: Clone>(&mut self, items: &[T], amount: usize) -> Vec<T> {
        items.iter().take(amount).cloned().collect()
    }
}
