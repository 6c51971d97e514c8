//! Chaotic storage wrapper for fault injection testing
//!
//! Storage wrapper that randomly fails operations to test that a failed save
//! is reported without rolling back the in-memory mutation, and that startup
//! degrades to defaults when the snapshot cannot be read.

use std::sync::{Arc, Mutex};

use super::{Storage, StorageError};
use crate::grid::SeatGrid;

/// Chaotic storage wrapper that randomly injects failures
///
/// Delegates to an underlying storage implementation but fails operations
/// based on a configured failure rate. Failed saves do not reach the inner
/// storage. Uses `Arc<Mutex<>>` for the RNG state, making it Clone and
/// thread-safe.
#[derive(Clone)]
pub struct ChaoticStorage<S: Storage> {
    inner: S,
    /// Failure rate (0.0 = never fail, 1.0 = always fail)
    failure_rate: f64,
    /// RNG state for deterministic chaos
    rng: Arc<Mutex<ChaoticRng>>,
    /// Number of injected failures
    failures: Arc<Mutex<usize>>,
}

/// Simple deterministic RNG for chaos injection
///
/// Uses linear congruential generator (LCG) for fast, deterministic randomness.
/// This ensures chaos tests are reproducible with the same seed.
struct ChaoticRng {
    state: u64,
}

impl ChaoticRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate next random value [0.0, 1.0)
    fn next(&mut self) -> f64 {
        // LCG constants from Numerical Recipes
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        (self.state as f64) / (M as f64)
    }

    /// Check if we should fail (returns true with probability = `failure_rate`)
    fn should_fail(&mut self, failure_rate: f64) -> bool {
        self.next() < failure_rate
    }
}

impl<S: Storage> ChaoticStorage<S> {
    /// Create a new chaotic storage wrapper
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn new(inner: S, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, 0x1234_5678_9ABC_DEF0)
    }

    /// Create with explicit seed for reproducible chaos
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    #[allow(clippy::panic)]
    pub fn with_seed(inner: S, failure_rate: f64, seed: u64) -> Self {
        assert!(
            (0.0..=1.0).contains(&failure_rate),
            "failure_rate must be between 0.0 and 1.0, got {failure_rate}"
        );

        Self {
            inner,
            failure_rate,
            rng: Arc::new(Mutex::new(ChaoticRng::new(seed))),
            failures: Arc::new(Mutex::new(0)),
        }
    }

    /// Underlying storage (for checking what actually got persisted).
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of operations that were failed on purpose.
    #[allow(clippy::expect_used)]
    pub fn failure_count(&self) -> usize {
        *self.failures.lock().expect("failures mutex poisoned")
    }

    /// Decide whether this operation fails, recording the failure if so.
    #[allow(clippy::expect_used)]
    fn inject(&self) -> Result<(), StorageError> {
        let fail =
            self.rng.lock().expect("ChaoticRng mutex poisoned").should_fail(self.failure_rate);
        if fail {
            let mut failures = self.failures.lock().expect("failures mutex poisoned");
            *failures += 1;
            return Err(StorageError::Io("chaotic failure injection".to_string()));
        }
        Ok(())
    }
}

impl<S: Storage> Storage for ChaoticStorage<S> {
    fn load(&self) -> Result<Option<SeatGrid>, StorageError> {
        self.inject()?;
        self.inner.load()
    }

    fn save(&self, grid: &SeatGrid) -> Result<(), StorageError> {
        self.inject()?;
        self.inner.save(grid)
    }
}
