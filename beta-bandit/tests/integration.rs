//! Integration tests for beta-bandit.
//!
//! These tests drive the full pipeline — CSV records to arms, selection, and
//! report summarization — without going through the binary.

use beta_bandit::{parse_counts, parse_rates, InputError};
use beta_bandit_core::{
    Arm, Experiment, OfflineScorer, OnlineLearner, RandomSource, Selector, StatsReporter,
    TerminalReporter,
};

fn experiment_from_csv(name: &str, csv: &str) -> Experiment {
    let mut experiment = Experiment::new(name);
    for record in parse_counts(csv.as_bytes()).unwrap() {
        experiment.add_arm(Arm::from_counts(record.name, record.successes, record.trials).unwrap());
    }
    experiment
}

/// The canonical two-arm example: B's posterior clearly dominates A's.
#[test]
fn test_offline_scoring_end_to_end() {
    let mut rng = RandomSource::seeded(42);
    let mut experiment = experiment_from_csv("console", "A,40,100\nB,60,100\n");

    let result = OfflineScorer::new(5000)
        .select(&mut experiment, &mut rng)
        .unwrap();

    assert_eq!(result.optimal_name, "B");
    assert_eq!(result.observations, 5000);
    assert!(experiment.arms()[1].chosen() > 4500);
    // B wins nearly every round, so the 95th-percentile gap against it is
    // at or near zero.
    assert!(result.potential_value_remaining >= 0.0);
    assert!(result.potential_value_remaining < 0.2);

    let report = StatsReporter::new(5000)
        .summarize(&experiment, &result, &mut rng)
        .unwrap();

    assert_eq!(report.arm_count, 2);
    assert_eq!(report.optimal().unwrap().name, "B");
    let comparison = report.comparison.as_ref().unwrap();
    assert_eq!(comparison.control_name, "A");
    assert!(comparison.relative.p5 <= comparison.relative.p50);
    assert!(comparison.relative.p50 <= comparison.relative.p95);

    // The rendered report names the experiment and both arms.
    let mut buffer = Vec::new();
    TerminalReporter::without_colors()
        .write_report(&mut buffer, &report)
        .unwrap();
    let output = String::from_utf8(buffer).unwrap();
    assert!(output.contains("experiment \"console\", 2 arms"));
    assert!(output.contains("win:"));
    assert!(output.contains("rel to control:"));
}

#[test]
fn test_seeded_pipeline_is_deterministic() {
    let run = || {
        let mut rng = RandomSource::seeded(7);
        let mut experiment = experiment_from_csv("console", "A,40,100\nB,60,100\nC,55,120\n");
        OfflineScorer::new(2000)
            .select(&mut experiment, &mut rng)
            .unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
}

#[test]
fn test_online_learning_end_to_end() {
    let mut rng = RandomSource::seeded(9);
    let mut experiment = Experiment::new("simulated");
    for record in parse_rates("low,0.10\nhigh,0.50\n".as_bytes()).unwrap() {
        experiment.add_arm(Arm::bernoulli(record.name, record.rate).unwrap());
    }

    let result = OnlineLearner::new(20_000)
        .select(&mut experiment, &mut rng)
        .unwrap();

    assert_eq!(result.optimal_name, "high");
    assert_eq!(result.observations, 20_000);

    let report = StatsReporter::new(2000)
        .summarize(&experiment, &result, &mut rng)
        .unwrap();
    let optimal = report.optimal().unwrap();
    assert_eq!(optimal.name, "high");
    // The learned posterior mean should be near the true rate.
    assert!((optimal.mean - 0.5).abs() < 0.05);
}

#[test]
fn test_malformed_csv_is_fatal() {
    let result = parse_counts("A,40,100\nnot a csv row\n".as_bytes());
    assert!(matches!(
        result,
        Err(InputError::MalformedLine { line: 2, .. })
    ));
}

#[test]
fn test_impossible_counts_rejected_at_construction() {
    let records = parse_counts("A,10,5\n".as_bytes()).unwrap();
    let record = &records[0];
    let result = Arm::from_counts(record.name.clone(), record.successes, record.trials);
    assert!(result.is_err());
}
