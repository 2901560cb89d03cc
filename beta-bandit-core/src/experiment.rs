//! An ordered collection of arms and the outcome of selecting among them.

use serde::{Deserialize, Serialize};

use crate::arm::Arm;

/// A named, ordered set of arms under evaluation.
///
/// Order matters only for the implicit control designation: the first arm
/// added is the baseline other arms are compared against.
#[derive(Debug, Clone)]
pub struct Experiment {
    name: String,
    arms: Vec<Arm>,
}

impl Experiment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arms: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_arm(&mut self, arm: Arm) {
        self.arms.push(arm);
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn arm(&self, index: usize) -> Option<&Arm> {
        self.arms.get(index)
    }

    /// Mutable access for callers driving arms from a real outcome feed.
    pub fn arm_mut(&mut self, index: usize) -> Option<&mut Arm> {
        self.arms.get_mut(index)
    }

    pub(crate) fn arms_mut(&mut self) -> &mut [Arm] {
        &mut self.arms
    }

    /// The implicit baseline: the first arm added, if any.
    pub fn control(&self) -> Option<&Arm> {
        self.arms.first()
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }
}

/// Immutable snapshot of a selection run.
///
/// Holds owned scalars plus the winning arm's index and name rather than a
/// borrow of the experiment, so results can outlive the run that produced
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Index of the arm judged most likely optimal.
    pub optimal_index: usize,
    /// Name of the optimal arm.
    pub optimal_name: String,
    /// Estimated success rate of the optimal arm.
    pub expected_value: f64,
    /// 95th-percentile relative gap between the per-round best sample and
    /// the optimal arm's sample.
    pub potential_value_remaining: f64,
    /// Number of Monte Carlo rounds or sequential pulls performed.
    pub observations: usize,
}
