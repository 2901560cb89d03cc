//! The Beta-Bernoulli arm model.
//!
//! Each arm's unknown success probability is tracked as a `Beta(alpha, beta)`
//! posterior, conjugate-updated from binary trial outcomes. The posterior
//! starts at the uniform `Beta(1, 1)` prior, so at all times
//! `alpha == 1 + rewards` and `beta == 1 + observations - rewards`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::{RandomSource, RngError};
use crate::stats::percentile;

/// Default number of Monte Carlo draws for descriptive statistics.
pub const MEAN_ITERATIONS: usize = 10_000;

/// Errors from constructing or sampling an arm.
#[derive(Debug, Error)]
pub enum ArmError {
    /// An arm cannot have seen more successes than trials.
    #[error("Invalid arm state: {rewards} rewards over {observations} observations")]
    InvalidCounts { rewards: u64, observations: u64 },

    /// Synthetic arms need a true success rate in [0, 1].
    #[error("Invalid true success rate: {0}")]
    InvalidRate(f64),

    /// Only synthetic arms can simulate their own outcomes.
    #[error("Arm '{0}' has no outcome source; supply outcomes externally")]
    NoOutcomeSource(String),

    /// Monte Carlo estimation needs at least one draw.
    #[error("Sampling requires at least one iteration")]
    NoIterations,

    /// A comparison denominator sample was zero, making the relative
    /// difference undefined.
    #[error("Degenerate comparison: arm '{0}' produced a zero-valued sample")]
    DegenerateComparison(String),

    /// Underlying draw failed.
    #[error(transparent)]
    Rng(#[from] RngError),
}

/// Where an arm's trial outcomes come from.
///
/// Modeled as a tagged variant rather than a stored callable so arms stay
/// plain inspectable data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeSource {
    /// Outcomes were observed historically (or arrive from a real feed).
    Historical,
    /// Outcomes are simulated from a fixed true success probability.
    Bernoulli { rate: f64 },
}

/// Monte Carlo summary of an arm's posterior.
#[derive(Debug, Clone)]
pub struct MeanEstimate {
    /// Arithmetic mean of the draws.
    pub mean: f64,
    /// Population standard deviation of the draws.
    pub std_dev: f64,
    /// The raw draws, for downstream percentile work.
    pub samples: Vec<f64>,
}

/// The 5th/50th/95th percentile values of a sampled difference sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferencePercentiles {
    pub p5: f64,
    pub p50: f64,
    pub p95: f64,
}

/// Pairwise posterior comparison between two arms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmComparison {
    /// Percentiles of `(self - other) / other` per paired round.
    pub relative: DifferencePercentiles,
    /// Percentiles of `self - other` per paired round.
    pub absolute: DifferencePercentiles,
}

/// One variant under evaluation, with its Beta posterior and counters.
#[derive(Debug, Clone)]
pub struct Arm {
    name: String,
    alpha: f64,
    beta: f64,
    observations: u64,
    rewards: u64,
    chosen: u64,
    source: OutcomeSource,
}

impl Arm {
    /// Create an arm from historical counts.
    ///
    /// The posterior is fixed at `Beta(1 + successes, 1 + trials - successes)`
    /// unless online updates are applied later.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::InvalidCounts`] if `successes > trials`.
    pub fn from_counts(
        name: impl Into<String>,
        successes: u64,
        trials: u64,
    ) -> Result<Self, ArmError> {
        if successes > trials {
            return Err(ArmError::InvalidCounts {
                rewards: successes,
                observations: trials,
            });
        }

        let mut arm = Self {
            name: name.into(),
            alpha: 1.0,
            beta: 1.0,
            observations: trials,
            rewards: successes,
            chosen: 0,
            source: OutcomeSource::Historical,
        };
        arm.update_beta_params();
        Ok(arm)
    }

    /// Create a synthetic arm that simulates outcomes at a fixed true success
    /// probability, starting from the uniform prior.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::InvalidRate`] if `rate` is outside [0, 1].
    pub fn bernoulli(name: impl Into<String>, rate: f64) -> Result<Self, ArmError> {
        if !(0.0..=1.0).contains(&rate) || !rate.is_finite() {
            return Err(ArmError::InvalidRate(rate));
        }

        Ok(Self {
            name: name.into(),
            alpha: 1.0,
            beta: 1.0,
            observations: 0,
            rewards: 0,
            chosen: 0,
            source: OutcomeSource::Bernoulli { rate },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Trials seen so far.
    pub fn observations(&self) -> u64 {
        self.observations
    }

    /// Successes seen so far.
    pub fn rewards(&self) -> u64 {
        self.rewards
    }

    /// Times this arm was selected as the round winner during a run.
    pub fn chosen(&self) -> u64 {
        self.chosen
    }

    pub fn source(&self) -> OutcomeSource {
        self.source
    }

    /// Closed-form posterior mean, `alpha / (alpha + beta)`.
    pub fn posterior_mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Draw one value from the arm's posterior. No counter side effects.
    pub fn sample(&self, rng: &mut RandomSource) -> Result<f64, ArmError> {
        Ok(rng.beta(self.alpha, self.beta)?)
    }

    /// Simulate one Bernoulli trial outcome at the arm's true rate.
    ///
    /// Does not touch the posterior; pass the outcome to
    /// [`Arm::record_observation`] to learn from it.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::NoOutcomeSource`] for historical arms.
    pub fn simulate_observation(&self, rng: &mut RandomSource) -> Result<bool, ArmError> {
        match self.source {
            OutcomeSource::Bernoulli { rate } => Ok(rng.bernoulli(rate)?),
            OutcomeSource::Historical => Err(ArmError::NoOutcomeSource(self.name.clone())),
        }
    }

    /// Record one trial outcome and fold it into the posterior.
    ///
    /// This is the only posterior-mutating operation; apply it exactly once
    /// per pull.
    pub fn record_observation(&mut self, success: bool) {
        self.observations += 1;
        if success {
            self.rewards += 1;
        }
        self.update_beta_params();
    }

    pub(crate) fn record_chosen(&mut self) {
        self.chosen += 1;
    }

    fn update_beta_params(&mut self) {
        self.alpha = 1.0 + self.rewards as f64;
        self.beta = 1.0 + self.observations as f64 - self.rewards as f64;
    }

    /// Estimate the posterior mean and population standard deviation from
    /// `iterations` independent draws.
    pub fn estimate_mean(
        &self,
        rng: &mut RandomSource,
        iterations: usize,
    ) -> Result<MeanEstimate, ArmError> {
        if iterations == 0 {
            return Err(ArmError::NoIterations);
        }

        let mut samples = Vec::with_capacity(iterations);
        let mut total = 0.0;
        for _ in 0..iterations {
            let draw = self.sample(rng)?;
            total += draw;
            samples.push(draw);
        }

        let mean = total / iterations as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / iterations as f64;

        Ok(MeanEstimate {
            mean,
            std_dev: variance.sqrt(),
            samples,
        })
    }

    /// Compare this arm's posterior against another via `iterations` paired
    /// draws.
    ///
    /// Each round draws both arms independently; the paired absolute
    /// difference is `self - other` and the relative difference is
    /// `(self - other) / other`. Both sequences are sorted ascending and read
    /// at the 5th/50th/95th percentile ranks.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::DegenerateComparison`] if any of the other arm's
    /// draws is exactly zero, which would make the relative difference
    /// undefined.
    pub fn compare(
        &self,
        other: &Arm,
        rng: &mut RandomSource,
        iterations: usize,
    ) -> Result<ArmComparison, ArmError> {
        if iterations == 0 {
            return Err(ArmError::NoIterations);
        }

        let ours = self.estimate_mean(rng, iterations)?.samples;
        let theirs = other.estimate_mean(rng, iterations)?.samples;

        let mut relative = Vec::with_capacity(iterations);
        let mut absolute = Vec::with_capacity(iterations);
        for (us, them) in ours.iter().zip(theirs.iter()) {
            if *them == 0.0 {
                return Err(ArmError::DegenerateComparison(other.name.clone()));
            }
            relative.push((us - them) / them);
            absolute.push(us - them);
        }

        relative.sort_by(|a, b| a.total_cmp(b));
        absolute.sort_by(|a, b| a.total_cmp(b));

        Ok(ArmComparison {
            relative: difference_percentiles(&relative),
            absolute: difference_percentiles(&absolute),
        })
    }
}

fn difference_percentiles(sorted: &[f64]) -> DifferencePercentiles {
    DifferencePercentiles {
        p5: percentile(sorted, 0.05),
        p50: percentile(sorted, 0.5),
        p95: percentile(sorted, 0.95),
    }
}
