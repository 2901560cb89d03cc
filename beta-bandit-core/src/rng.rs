//! Random stream handle for posterior sampling.
//!
//! All stochastic operations in the engine draw from an explicitly constructed
//! [`RandomSource`] rather than an ambient global generator, so a fixed seed
//! makes an entire run reproducible.

use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Beta;
use thiserror::Error;

/// Errors from constructing a draw with invalid distribution parameters.
#[derive(Debug, Error)]
pub enum RngError {
    /// Beta shape parameters must be positive and finite.
    #[error("Invalid Beta shape parameters: alpha={alpha}, beta={beta}")]
    InvalidShape { alpha: f64, beta: f64 },

    /// Bernoulli success probability must lie in [0, 1].
    #[error("Invalid Bernoulli probability: {0}")]
    InvalidProbability(f64),
}

/// A seedable pseudo-random stream supplying Beta and Bernoulli draws.
///
/// One `RandomSource` is threaded through a whole run. Workers that want to
/// parallelize Monte Carlo rounds should each construct their own seeded
/// stream instead of sharing this one.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create a deterministic stream from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a stream seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw one value from `Beta(alpha, beta)`.
    pub fn beta(&mut self, alpha: f64, beta: f64) -> Result<f64, RngError> {
        let dist = Beta::new(alpha, beta).map_err(|_| RngError::InvalidShape { alpha, beta })?;
        Ok(dist.sample(&mut self.rng))
    }

    /// Draw one Bernoulli outcome at success probability `p`.
    pub fn bernoulli(&mut self, p: f64) -> Result<bool, RngError> {
        let dist = Bernoulli::new(p).map_err(|_| RngError::InvalidProbability(p))?;
        Ok(dist.sample(&mut self.rng))
    }
}
