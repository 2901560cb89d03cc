//! Core engine for beta-bandit.
//!
//! This crate provides the Beta-Bernoulli multi-armed bandit model and the
//! Thompson-sampling machinery used by the beta-bandit CLI: per-arm posterior
//! sampling, offline and online arm selection, and the Monte Carlo statistics
//! that back the final report.

pub mod arm;
pub mod experiment;
pub mod report;
pub mod rng;
pub mod select;
pub mod stats;

// Re-export main types for convenience
pub use arm::{
    Arm, ArmComparison, ArmError, DifferencePercentiles, MeanEstimate, OutcomeSource,
    MEAN_ITERATIONS,
};
pub use experiment::{Experiment, SelectionResult};
pub use report::{
    ArmSummary, ControlComparison, ExperimentReport, JsonReporter, ReportError, Reporter,
    TerminalReporter,
};
pub use rng::{RandomSource, RngError};
pub use select::{OfflineScorer, OnlineLearner, SelectError, Selector};
pub use stats::{percentile, StatsError, StatsReporter};
