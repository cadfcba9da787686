//! End-to-end tests for the batch `run` command against real files.

use dice_posterior::commands::{RunConfig, run_inference};
use dice_posterior::model::build_model;
use dice_posterior::output::UnobservablePolicy;
use std::fs;
use tempfile::tempdir;

fn quiet(config: RunConfig) -> RunConfig {
    RunConfig {
        show_progress: false,
        ..config
    }
}

#[test]
fn run_writes_posterior_table() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("out.csv");
    fs::write(&input, "E\n\nH\nHHHHHHHHHH\n").unwrap();

    let model = build_model(1, 6).unwrap();
    let summary = run_inference(&model, &quiet(RunConfig::new(&input, &output))).unwrap();

    assert_eq!(summary.rows_read, 3);
    assert_eq!(summary.rows_written, 3);
    assert_eq!(summary.invalid_rows, 0);

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "input,P(d=1),P(d=2),P(d=3),P(d=4),P(d=5),P(d=6),guess"
    );
    assert_eq!(
        lines[1],
        "E,0.16667,0.16667,0.16667,0.16667,0.16667,0.16667,1"
    );
    // P(H|r) = (6 - r) / 6, posterior ∝ 6 - r
    assert_eq!(
        lines[2],
        "H,0.33333,0.26667,0.20000,0.13333,0.06667,0.00000,1"
    );
    assert!(lines[3].starts_with("HHHH...,"));
    assert!(lines[3].ends_with(",1"));
}

#[test]
fn run_aborts_on_malformed_row() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("out.csv");
    fs::write(&input, "HHE\nHXE\n").unwrap();

    let model = build_model(2, 6).unwrap();
    let err = run_inference(&model, &quiet(RunConfig::new(&input, &output))).unwrap_err();

    assert!(err.to_string().contains("line 2"));
    assert!(!output.exists());
}

#[test]
fn run_skips_malformed_rows_when_asked() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let output = dir.path().join("out.csv");
    fs::write(&input, "HHE\nHXE\nLL\n").unwrap();

    let model = build_model(2, 6).unwrap();
    let config = RunConfig {
        skip_invalid: true,
        ..quiet(RunConfig::new(&input, &output))
    };
    let summary = run_inference(&model, &config).unwrap();

    assert_eq!(summary.invalid_rows, 1);
    assert_eq!(summary.rows_written, 2);
    assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 3);
}

#[test]
fn run_marks_or_skips_unobservable_rows() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let marked = dir.path().join("marked.csv");
    let skipped = dir.path().join("skipped.csv");
    // A two-sided die cannot be both above and below a fresh roll
    fs::write(&input, "HE\nHL\n").unwrap();

    let model = build_model(1, 2).unwrap();

    let summary = run_inference(&model, &quiet(RunConfig::new(&input, &marked))).unwrap();
    assert_eq!(summary.unobservable_rows, 1);
    let text = fs::read_to_string(&marked).unwrap();
    assert_eq!(text.lines().last(), Some("HL,,,unobservable"));

    let config = RunConfig {
        unobservable: UnobservablePolicy::Skip,
        ..quiet(RunConfig::new(&input, &skipped))
    };
    let summary = run_inference(&model, &config).unwrap();
    assert_eq!(summary.rows_written, 1);
    assert_eq!(fs::read_to_string(&skipped).unwrap().lines().count(), 2);
}

#[test]
fn run_reports_missing_input() {
    let dir = tempdir().unwrap();
    let model = build_model(2, 6).unwrap();
    let config = quiet(RunConfig::new(
        dir.path().join("missing.txt"),
        dir.path().join("out.csv"),
    ));

    let err = run_inference(&model, &config).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}
