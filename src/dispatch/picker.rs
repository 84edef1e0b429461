use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::ValidationError;

/// Uniform endpoint selection with replacement.
///
/// The RNG is shared behind a mutex that is never held across an await, so
/// a fixed seed gives a reproducible pick sequence.
#[derive(Debug)]
pub struct EndpointPicker {
    endpoints: Vec<String>,
    rng: Mutex<StdRng>,
}

impl EndpointPicker {
    /// # Errors
    ///
    /// Returns an error when `endpoints` is empty.
    pub fn new(endpoints: Vec<String>, seed: Option<u64>) -> Result<Self, ValidationError> {
        if endpoints.is_empty() {
            return Err(ValidationError::EndpointsEmpty);
        }
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Ok(Self {
            endpoints,
            rng: Mutex::new(rng),
        })
    }

    #[must_use]
    pub fn pick(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        // Never empty, see `new`.
        self.endpoints
            .choose(&mut *rng)
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }
}
