//! beta-bandit: Bayesian evaluation of A/B experiment arms
//!
//! This crate wires the beta-bandit-core Thompson-sampling engine to a CLI:
//! CSV ingestion of arm records, TOML configuration, and report rendering.

pub mod cli;
pub mod config;
pub mod input;

// Re-export core types for convenience
pub use beta_bandit_core::{
    Arm, ArmError, Experiment, ExperimentReport, JsonReporter, OfflineScorer, OnlineLearner,
    RandomSource, Reporter, SelectionResult, Selector, StatsReporter, TerminalReporter,
};

// Re-export main types from this crate
pub use cli::{Cli, Command};
pub use config::Config;
pub use input::{parse_counts, parse_rates, CountRecord, InputError, RateRecord};
