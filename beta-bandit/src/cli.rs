//! Command-line interface for beta-bandit.

use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "beta-bandit")]
#[command(about = "Bayesian evaluation of A/B experiment arms via Thompson sampling")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Experiment name used in the report
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Seed for the random stream (omit for an entropy seed)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Emit the report as JSON instead of the terminal table
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored terminal output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to config file
    #[arg(long, global = true, default_value = ".beta-bandit.toml")]
    pub config: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score historical arms over their fixed posteriors
    Score {
        /// CSV file with one `arm_name,successes,trials` row per arm.
        /// Reads from stdin when omitted.
        file: Option<PathBuf>,

        /// Number of Monte Carlo scoring rounds
        #[arg(long)]
        iterations: Option<usize>,
    },

    /// Simulate sequential Thompson learning over synthetic arms
    Learn {
        /// CSV file with one `arm_name,true_rate` row per arm.
        /// Reads from stdin when omitted.
        file: Option<PathBuf>,

        /// Number of sequential pulls
        #[arg(long)]
        rounds: Option<usize>,
    },
}

impl Cli {
    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    /// Only non-None optional values will override the config.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(name) = &self.name {
            config.experiment.name = name.clone();
        }

        match &self.command {
            Command::Score { iterations, .. } => {
                if let Some(iterations) = iterations {
                    config.sampling.iterations = *iterations;
                }
            }
            Command::Learn { rounds, .. } => {
                if let Some(rounds) = rounds {
                    config.learning.rounds = *rounds;
                }
            }
        }
    }
}
