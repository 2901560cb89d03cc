use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use beta_bandit::{parse_counts, parse_rates, Cli, Command, Config};
use beta_bandit_core::{
    Arm, Experiment, JsonReporter, OfflineScorer, OnlineLearner, RandomSource, Reporter,
    SelectionResult, Selector, StatsReporter, TerminalReporter,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config and apply CLI overrides
    let mut config = Config::load_from(Some(Path::new(&cli.config)))?;
    cli.apply_to_config(&mut config);

    if cli.verbose {
        eprintln!("Configuration: {:?}", config);
    }

    let mut rng = match cli.seed {
        Some(seed) => RandomSource::seeded(seed),
        None => RandomSource::from_entropy(),
    };

    // 1. Build the experiment from input records
    let mut experiment = Experiment::new(config.experiment.name.clone());
    let result: SelectionResult = match &cli.command {
        Command::Score { file, .. } => {
            let reader = open_input(file.as_ref())?;
            let records = parse_counts(reader).context("Failed to parse arm records")?;
            for record in records {
                let arm = Arm::from_counts(record.name, record.successes, record.trials)
                    .context("Failed to construct arm")?;
                experiment.add_arm(arm);
            }

            if cli.verbose {
                eprintln!("Scoring {} arms...", experiment.len());
            }

            // 2. Run the offline scorer over the fixed posteriors
            OfflineScorer::new(config.sampling.iterations)
                .select(&mut experiment, &mut rng)
                .context("Scoring failed")?
        }
        Command::Learn { file, .. } => {
            let reader = open_input(file.as_ref())?;
            let records = parse_rates(reader).context("Failed to parse arm records")?;
            for record in records {
                let arm = Arm::bernoulli(record.name, record.rate)
                    .context("Failed to construct arm")?;
                experiment.add_arm(arm);
            }

            if cli.verbose {
                eprintln!(
                    "Learning over {} arms for {} rounds...",
                    experiment.len(),
                    config.learning.rounds
                );
            }

            // 2. Run the online learner against the synthetic feeds
            OnlineLearner::new(config.learning.rounds)
                .select(&mut experiment, &mut rng)
                .context("Learning failed")?
        }
    };

    // 3. Summarize the run
    let report = StatsReporter::new(config.sampling.mean_iterations)
        .summarize(&experiment, &result, &mut rng)
        .context("Failed to summarize experiment")?;

    // 4. Render
    if cli.json {
        JsonReporter::pretty().report(&report)?;
    } else if cli.no_color {
        TerminalReporter::without_colors().report(&report)?;
    } else {
        TerminalReporter::new().report(&report)?;
    }

    Ok(())
}

fn open_input(file: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}
