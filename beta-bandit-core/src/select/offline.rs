//! Offline round-tally scoring over fixed posteriors.

use super::{sample_round, SelectError, Selector};
use crate::arm::MEAN_ITERATIONS;
use crate::experiment::{Experiment, SelectionResult};
use crate::rng::RandomSource;
use crate::stats::percentile;

/// Thompson scoring of an experiment whose posteriors do not update.
///
/// Runs `iterations` independent rounds; each round samples every arm once
/// and the arm with the largest draw wins the round. The arm with the most
/// round wins is judged optimal, and the spread of per-round gaps against it
/// yields the potential value remaining.
#[derive(Debug, Clone)]
pub struct OfflineScorer {
    /// Number of Monte Carlo rounds.
    pub iterations: usize,
}

impl Default for OfflineScorer {
    fn default() -> Self {
        Self {
            iterations: MEAN_ITERATIONS,
        }
    }
}

impl OfflineScorer {
    pub fn new(iterations: usize) -> Self {
        Self { iterations }
    }
}

impl Selector for OfflineScorer {
    fn select(
        &self,
        experiment: &mut Experiment,
        rng: &mut RandomSource,
    ) -> Result<SelectionResult, SelectError> {
        if experiment.is_empty() {
            return Err(SelectError::NoArms(experiment.name().to_string()));
        }
        if self.iterations == 0 {
            return Err(SelectError::NoRounds);
        }

        // Round-win tallies double as the arms' `chosen` counters.
        let mut rounds = Vec::with_capacity(self.iterations);
        let mut tallies = vec![0u64; experiment.len()];
        for _ in 0..self.iterations {
            let (samples, max_index) = sample_round(experiment.arms(), rng)?;
            tallies[max_index] += 1;
            experiment.arms_mut()[max_index].record_chosen();
            rounds.push(samples);
        }

        let mut optimal_index = 0;
        for (index, &tally) in tallies.iter().enumerate() {
            if tally > tallies[optimal_index] {
                optimal_index = index;
            }
        }
        let optimal_name = experiment.arms()[optimal_index].name().to_string();

        // The potential value remaining is the 95th percentile of the
        // posterior distribution of (round_max - optimal) / optimal, where
        // round_max is the largest sample in a round and optimal is the same
        // round's sample for the arm judged optimal.
        let mut value_dist = Vec::with_capacity(self.iterations);
        let mut round_max = 0.0;
        for samples in &rounds {
            round_max = samples.iter().copied().fold(f64::MIN, f64::max);
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
            // The maximum sample seen in the final bookkeeping round.
            expected_value: round_max,
            potential_value_remaining: percentile(&value_dist, 0.95),
            observations: self.iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm::Arm;

    fn experiment_ab() -> Experiment {
        let mut experiment = Experiment::new("test");
        experiment.add_arm(Arm::from_counts("A", 40, 100).unwrap());
        experiment.add_arm(Arm::from_counts("B", 60, 100).unwrap());
        experiment
    }

    #[test]
    fn test_stronger_arm_wins() {
        let mut rng = RandomSource::seeded(101);
        let mut experiment = experiment_ab();

        let result = OfflineScorer::new(5000)
            .select(&mut experiment, &mut rng)
            .unwrap();

        assert_eq!(result.optimal_name, "B");
        assert_eq!(result.optimal_index, 1);
        assert_eq!(result.observations, 5000);
        assert!(result.potential_value_remaining >= 0.0);
        assert!(result.potential_value_remaining < 0.5);
        // B should win the large majority of rounds.
        assert!(experiment.arms()[1].chosen() > 4000);
    }

    #[test]
    fn test_overlapping_arms_leave_value_remaining() {
        // Near-identical posteriors: the loser beats the winner often enough
        // that the 95th-percentile gap is strictly positive.
        let mut rng = RandomSource::seeded(55);
        let mut experiment = Experiment::new("close");
        experiment.add_arm(Arm::from_counts("A", 50, 100).unwrap());
        experiment.add_arm(Arm::from_counts("B", 52, 100).unwrap());

        let result = OfflineScorer::new(5000)
            .select(&mut experiment, &mut rng)
            .unwrap();
        assert!(result.potential_value_remaining > 0.0);
    }

    #[test]
    fn test_tallies_conserve_rounds() {
        let mut rng = RandomSource::seeded(5);
        let mut experiment = experiment_ab();
        experiment.add_arm(Arm::from_counts("C", 50, 100).unwrap());

        OfflineScorer::new(2000)
            .select(&mut experiment, &mut rng)
            .unwrap();

        let total: u64 = experiment.arms().iter().map(|arm| arm.chosen()).sum();
        assert_eq!(total, 2000);
    }

    #[test]
    fn test_pvr_non_negative() {
        for seed in 0..10 {
            let mut rng = RandomSource::seeded(seed);
            let mut experiment = experiment_ab();
            let result = OfflineScorer::new(500)
                .select(&mut experiment, &mut rng)
                .unwrap();
            assert!(result.potential_value_remaining >= 0.0);
        }
    }

    #[test]
    fn test_single_arm_has_no_value_remaining() {
        let mut rng = RandomSource::seeded(9);
        let mut experiment = Experiment::new("solo");
        experiment.add_arm(Arm::from_counts("only", 10, 20).unwrap());

        let result = OfflineScorer::new(1000)
            .select(&mut experiment, &mut rng)
            .unwrap();
        assert_eq!(result.optimal_index, 0);
        assert_eq!(result.potential_value_remaining, 0.0);
        assert_eq!(experiment.arms()[0].chosen(), 1000);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let run = |seed: u64| {
            let mut rng = RandomSource::seeded(seed);
            let mut experiment = experiment_ab();
            OfflineScorer::new(1000)
                .select(&mut experiment, &mut rng)
                .unwrap()
        };

        assert_eq!(run(77), run(77));
        assert_ne!(run(77), run(78));
    }

    #[test]
    fn test_posteriors_unchanged_by_scoring() {
        let mut rng = RandomSource::seeded(13);
        let mut experiment = experiment_ab();

        OfflineScorer::new(100)
            .select(&mut experiment, &mut rng)
            .unwrap();

        assert_eq!(experiment.arms()[0].observations(), 100);
        assert_eq!(experiment.arms()[0].rewards(), 40);
        assert_eq!(experiment.arms()[1].observations(), 100);
        assert_eq!(experiment.arms()[1].rewards(), 60);
    }

    #[test]
    fn test_empty_experiment_fails_fast() {
        let mut rng = RandomSource::seeded(0);
        let mut experiment = Experiment::new("empty");
        let result = OfflineScorer::default().select(&mut experiment, &mut rng);
        assert!(matches!(result, Err(SelectError::NoArms(_))));
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let mut rng = RandomSource::seeded(0);
        let mut experiment = experiment_ab();
        let result = OfflineScorer::new(0).select(&mut experiment, &mut rng);
        assert!(matches!(result, Err(SelectError::NoRounds)));
    }
}
