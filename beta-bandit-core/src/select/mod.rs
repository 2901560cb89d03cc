//! Thompson-sampling arm selection.
//!
//! Two variants share the same decision rule (sample every posterior, take
//! the strict maximum) but differ in what happens between rounds: the
//! offline scorer leaves posteriors fixed and tallies round wins, while the
//! online learner feeds each pull's outcome back into the chosen arm.

use thiserror::Error;

use crate::arm::{Arm, ArmError};
use crate::experiment::{Experiment, SelectionResult};
use crate::rng::RandomSource;

/// Errors from running a selection procedure.
#[derive(Debug, Error)]
pub enum SelectError {
    /// An experiment with no arms has no valid choice.
    #[error("No arms configured in experiment '{0}'")]
    NoArms(String),

    /// Selection needs at least one round.
    #[error("Selection requires at least one round")]
    NoRounds,

    /// An arm drew a zero-valued sample, making the potential-value-remaining
    /// ratio undefined.
    #[error("Degenerate sample: arm '{0}' drew a zero-valued posterior sample")]
    DegenerateSample(String),

    /// Sampling an arm failed.
    #[error(transparent)]
    Arm(#[from] ArmError),
}

/// A procedure that picks the most likely optimal arm of an experiment.
pub trait Selector: Send + Sync {
    /// Run the selection procedure, mutating arm counters (and, for online
    /// variants, posteriors) along the way.
    fn select(
        &self,
        experiment: &mut Experiment,
        rng: &mut RandomSource,
    ) -> Result<SelectionResult, SelectError>;
}

/// One Thompson round: sample every arm, return the draws and the index of
/// the strict maximum (first-seen tie-break).
pub(crate) fn sample_round(
    arms: &[Arm],
    rng: &mut RandomSource,
) -> Result<(Vec<f64>, usize), SelectError> {
    let mut samples = Vec::with_capacity(arms.len());
    let mut max_index = 0;
    for (index, arm) in arms.iter().enumerate() {
        let draw = arm.sample(rng)?;
        if index == 0 || draw > samples[max_index] {
            max_index = index;
        }
        samples.push(draw);
    }
    Ok((samples, max_index))
}

mod offline;
mod online;

pub use offline::OfflineScorer;
pub use online::OnlineLearner;
