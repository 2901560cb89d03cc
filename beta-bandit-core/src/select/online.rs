//! Online sequential Thompson learning.

use super::{sample_round, SelectError, Selector};
use crate::arm::MEAN_ITERATIONS;
use crate::experiment::{Experiment, SelectionResult};
use crate::rng::RandomSource;
use crate::stats::percentile;

/// Sequential Thompson sampling with posterior updates after every pull.
///
/// Each round samples every arm, pulls the arm with the largest draw, and
/// folds the pulled outcome back into that arm's posterior. Exploration
/// fades naturally as posteriors sharpen with accumulated observations.
///
/// [`Selector::select`] drives synthetic arms end to end. Real outcome feeds
/// instead call [`OnlineLearner::choose`] per round and apply
/// `record_observation` on the chosen arm themselves.
#[derive(Debug, Clone)]
pub struct OnlineLearner {
    /// Number of sequential pulls.
    pub rounds: usize,
}

impl Default for OnlineLearner {
    fn default() -> Self {
        Self {
            rounds: MEAN_ITERATIONS,
        }
    }
}

impl OnlineLearner {
    pub fn new(rounds: usize) -> Self {
        Self { rounds }
    }

    /// Run one Thompson round: sample every arm and mark the winner chosen.
    ///
    /// Returns the chosen arm's index. The caller must obtain an outcome for
    /// exactly one pull of that arm and record it before choosing again.
    pub fn choose(
        &self,
        experiment: &mut Experiment,
        rng: &mut RandomSource,
    ) -> Result<usize, SelectError> {
        if experiment.is_empty() {
            return Err(SelectError::NoArms(experiment.name().to_string()));
        }
        let (_, index) = sample_round(experiment.arms(), rng)?;
        experiment.arms_mut()[index].record_chosen();
        Ok(index)
    }
}

impl Selector for OnlineLearner {
    fn select(
        &self,
        experiment: &mut Experiment,
        rng: &mut RandomSource,
    ) -> Result<SelectionResult, SelectError> {
        if experiment.is_empty() {
            return Err(SelectError::NoArms(experiment.name().to_string()));
        }
        if self.rounds == 0 {
            return Err(SelectError::NoRounds);
        }

        let mut rounds = Vec::with_capacity(self.rounds);
        for _ in 0..self.rounds {
            let (samples, index) = sample_round(experiment.arms(), rng)?;
            experiment.arms_mut()[index].record_chosen();

            let outcome = experiment.arms()[index].simulate_observation(rng)?;
            experiment.arms_mut()[index].record_observation(outcome);
            rounds.push(samples);
        }

        // One extra scoring pass over the learned posteriors picks the final
        // winner; its sample is the expected value.
        let (finals, optimal_index) = sample_round(experiment.arms(), rng)?;
        let optimal_name = experiment.arms()[optimal_index].name().to_string();

        // Gap distribution over the learning rounds, measured against the
        // arm that ultimately won.
        let mut value_dist = Vec::with_capacity(self.rounds);
        for samples in &rounds {
            let round_max = samples.iter().copied().fold(f64::MIN, f64::max);
            let optimal_sample = samples[optimal_index];
            if optimal_sample == 0.0 {
                return Err(SelectError::DegenerateSample(optimal_name));
            }
            value_dist.push((round_max - optimal_sample) / optimal_sample);
        }
        value_dist.sort_by(|a, b| a.total_cmp(b));

        Ok(SelectionResult {
            optimal_index,
            optimal_name,
            expected_value: finals[optimal_index],
            potential_value_remaining: percentile(&value_dist, 0.95),
            observations: self.rounds,
        })
    }
}
