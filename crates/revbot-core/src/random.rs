use std::sync::{Mutex, PoisonError};

use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable source of randomness shared by reviewer selection.
///
/// The generator is locked for a single draw at a time.
pub struct RandomSource {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Pick up to `amount` distinct elements, uniformly and without replacement.
    pub fn choose_multiple<T: Clone>(&self, values: &[T], amount: usize) -> Vec<T> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        values
            .choose_multiple(&mut *rng, amount)
            .cloned()
            .collect()
    }

    pub fn choose<T: Clone>(&self, values: &[T]) -> Option<T> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        values.choose(&mut *rng).cloned()
    }
}
