//! Random source backing all generation.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::PropertyError;

/// The single point of nondeterminism in the library.
///
/// A `RandomSource` hands out uniformly distributed integers from an
/// underlying `StdRng` stream. `Clone` produces another handle onto the
/// *same* stream: dependent generators (`Gen::bind`) keep a handle inside
/// their shrink trees so that revisiting an outer value during shrink search
/// can draw fresh randomness. Draws are strictly sequential, so a seeded
/// source reproduces a whole run.
///
/// The type is deliberately neither `Send` nor `Sync`; the engine is
/// single-threaded. A concurrent adaptation must give every trial its own
/// source (see [`RandomSource::fork`]).
#[derive(Clone)]
pub struct RandomSource {
    rng: Rc<RefCell<StdRng>>,
}

impl RandomSource {
    /// Create a source seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a reproducible source from a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Rc::new(RefCell::new(rng)),
        }
    }

    /// Draw a uniform integer from the inclusive range `[low, high]`.
    ///
    /// Fails with [`PropertyError::InvalidRange`] when `low > high`.
    pub fn next_int(&self, low: i64, high: i64) -> Result<i64, PropertyError> {
        if low > high {
            return Err(PropertyError::invalid_range(low, high));
        }
        Ok(self.draw(low, high))
    }

    /// Uniform draw for a range already known to be non-empty.
    pub(crate) fn draw(&self, low: i64, high: i64) -> i64 {
        self.rng.borrow_mut().gen_range(low..=high)
    }

    /// Split off an independent stream seeded from a draw on this one.
    ///
    /// Forked sources advance independently, so per-trial forks stay
    /// reproducible even if one trial's draw count changes.
    pub fn fork(&self) -> RandomSource {
        let seed = self.rng.borrow_mut().next_u64();
        Self::with_seed(seed)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}
