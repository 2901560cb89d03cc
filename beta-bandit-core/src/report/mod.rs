use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arm::DifferencePercentiles;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Descriptive statistics for one arm, as rendered in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmSummary {
    pub name: String,
    pub successes: u64,
    pub trials: u64,
    /// Rounds this arm won during selection.
    pub chosen: u64,
    /// Monte Carlo posterior mean.
    pub mean: f64,
    /// Population standard deviation of the posterior draws.
    pub std_dev: f64,
    /// Whether this arm was judged optimal.
    pub optimal: bool,
}

/// Percentile table of the optimal arm's difference versus the control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlComparison {
    pub control_name: String,
    pub relative: DifferencePercentiles,
    pub absolute: DifferencePercentiles,
}

/// Everything the reporting layer needs to render one selection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub experiment_name: String,
    pub arm_count: usize,
    pub observations: usize,
    pub expected_value: f64,
    pub potential_value_remaining: f64,
    /// Per-arm summaries in experiment order.
    pub arms: Vec<ArmSummary>,
    /// Present unless the optimal arm is the control itself.
    pub comparison: Option<ControlComparison>,
}

impl ExperimentReport {
    /// The summary of the arm judged optimal.
    pub fn optimal(&self) -> Option<&ArmSummary> {
        self.arms.iter().find(|arm| arm.optimal)
    }
}

pub trait Reporter: Send + Sync {
    fn report(&self, report: &ExperimentReport) -> Result<(), ReportError>;
}

mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;
