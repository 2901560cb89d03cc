//! Monte Carlo summary statistics over an experiment.

use thiserror::Error;

use crate::arm::{ArmError, MEAN_ITERATIONS};
use crate::experiment::{Experiment, SelectionResult};
use crate::report::{ArmSummary, ControlComparison, ExperimentReport};
use crate::rng::RandomSource;

/// Errors from building an experiment report.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The selection result points at an arm the experiment doesn't have.
    #[error("Optimal arm index {index} out of range for {arms} arms")]
    OptimalOutOfRange { index: usize, arms: usize },

    /// Sampling an arm failed.
    #[error(transparent)]
    Arm(#[from] ArmError),
}

/// Value at the zero-based rank `floor(p * len)` of an ascending-sorted
/// sequence, with the rank clamped into range so small sequences stay valid.
///
/// `sorted` must be non-empty.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty(), "percentile of empty sequence");
    let rank = ((p * sorted.len() as f64).floor() as usize).min(sorted.len() - 1);
    sorted[rank]
}

/// Builds descriptive statistics for a completed selection run.
///
/// Pure with respect to experiment state: sampling a posterior has no side
/// effects, so `summarize` mutates nothing but the random stream.
#[derive(Debug, Clone)]
pub struct StatsReporter {
    /// Number of Monte Carlo draws per arm estimate and comparison.
    pub mean_iterations: usize,
}

impl Default for StatsReporter {
    fn default() -> Self {
        Self {
            mean_iterations: MEAN_ITERATIONS,
        }
    }
}

impl StatsReporter {
    pub fn new(mean_iterations: usize) -> Self {
        Self { mean_iterations }
    }

    /// Summarize every arm and compare the winner against the control.
    ///
    /// The comparison is skipped when the optimal arm *is* the control.
    pub fn summarize(
        &self,
        experiment: &Experiment,
        result: &SelectionResult,
        rng: &mut RandomSource,
    ) -> Result<ExperimentReport, StatsError> {
        let optimal = experiment.arm(result.optimal_index).ok_or(
            StatsError::OptimalOutOfRange {
                index: result.optimal_index,
                arms: experiment.len(),
            },
        )?;

        let mut arms = Vec::with_capacity(experiment.len());
        for (index, arm) in experiment.arms().iter().enumerate() {
            let estimate = arm.estimate_mean(rng, self.mean_iterations)?;
            arms.push(ArmSummary {
                name: arm.name().to_string(),
                successes: arm.rewards(),
                trials: arm.observations(),
                chosen: arm.chosen(),
                mean: estimate.mean,
                std_dev: estimate.std_dev,
                optimal: index == result.optimal_index,
            });
        }

        let comparison = match experiment.control() {
            Some(control) if result.optimal_index != 0 => {
                let comparison = optimal.compare(control, rng, self.mean_iterations)?;
                Some(ControlComparison {
                    control_name: control.name().to_string(),
                    relative: comparison.relative,
                    absolute: comparison.absolute,
                })
            }
            _ => None,
        };

        Ok(ExperimentReport {
            experiment_name: experiment.name().to_string(),
            arm_count: experiment.len(),
            observations: result.observations,
            expected_value: result.expected_value,
            potential_value_remaining: result.potential_value_remaining,
            arms,
            comparison,
        })
    }
}
