//! Batch inference command
//!
//! Reads one observation sequence per line, computes each posterior against
//! the shared model, and writes the posterior table.

use crate::core::ObservationSequence;
use crate::error::ObservationError;
use crate::inference::{InferenceStrategy, Posterior, StrategyType};
use crate::input::{InputRow, load_rows};
use crate::model::DiceModel;
use crate::output::{CsvSink, UnobservablePolicy};
use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Configuration for a batch run
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub strategy: StrategyType,
    pub skip_invalid: bool,
    pub unobservable: UnobservablePolicy,
    pub parallel: bool,
    pub show_progress: bool,
}

impl RunConfig {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            strategy: StrategyType::default(),
            skip_invalid: false,
            unobservable: UnobservablePolicy::default(),
            parallel: true,
            show_progress: true,
        }
    }
}

/// Result of a batch run
#[derive(Debug)]
pub struct RunSummary {
    pub strategy: &'static str,
    pub rows_read: usize,
    pub rows_written: usize,
    pub invalid_rows: usize,
    pub unobservable_rows: usize,
    /// How many rows chose each MAP sum
    pub map_histogram: FxHashMap<usize, usize>,
    pub duration: Duration,
}

/// Per-row inference outcome
#[derive(Debug)]
pub enum RowOutcome {
    Posterior(Posterior),
    Unobservable,
    Invalid(ObservationError),
}

/// Run inference for every row of `config.input` and write `config.output`
///
/// # Errors
///
/// Returns an error if:
/// - The input cannot be read or the output cannot be written
/// - A row holds a symbol other than H, E, L and `skip_invalid` is off
pub fn run_inference(model: &DiceModel, config: &RunConfig) -> Result<RunSummary> {
    let start = Instant::now();
    let rows = load_rows(&config.input)
        .with_context(|| format!("failed to read {}", config.input.display()))?;
    info!(
        rows = rows.len(),
        input = %config.input.display(),
        strategy = config.strategy.name(),
        "loaded observation rows"
    );

    let outcomes = evaluate_rows(model, &rows, config);
    if !config.skip_invalid {
        reject_invalid(&rows, &outcomes)?;
    }

    let file = File::create(&config.output)
        .with_context(|| format!("failed to create {}", config.output.display()))?;
    let mut sink = CsvSink::new(BufWriter::new(file), model.domain());

    let summary = write_outcomes(&mut sink, &rows, &outcomes, config, start)
        .with_context(|| format!("failed to write {}", config.output.display()))?;
    info!(
        written = summary.rows_written,
        output = %config.output.display(),
        "wrote posterior table"
    );

    Ok(summary)
}

/// Infer every row against the shared model, preserving input order
#[must_use]
pub fn evaluate_rows(model: &DiceModel, rows: &[InputRow], config: &RunConfig) -> Vec<RowOutcome> {
    let pb = progress_bar(rows.len(), config.show_progress);
    let strategy = config.strategy;

    let evaluate = |row: &InputRow| {
        let outcome = evaluate_row(model, strategy, row);
        pb.inc(1);
        outcome
    };

    let outcomes: Vec<RowOutcome> = if config.parallel {
        rows.par_iter().map(evaluate).collect()
    } else {
        rows.iter().map(evaluate).collect()
    };

    pb.finish_and_clear();
    outcomes
}

fn evaluate_row(model: &DiceModel, strategy: StrategyType, row: &InputRow) -> RowOutcome {
    let sequence = match ObservationSequence::parse(&row.text) {
        Ok(sequence) => sequence,
        Err(e) => return RowOutcome::Invalid(e),
    };

    match strategy.infer(model, &sequence) {
        Ok(posterior) => RowOutcome::Posterior(posterior),
        Err(e) => {
            debug!(line = row.line_number, "{e}");
            RowOutcome::Unobservable
        }
    }
}

fn reject_invalid(rows: &[InputRow], outcomes: &[RowOutcome]) -> Result<()> {
    for (row, outcome) in rows.iter().zip(outcomes) {
        if let RowOutcome::Invalid(e) = outcome {
            bail!("line {}: {e}", row.line_number);
        }
    }
    Ok(())
}

/// Write header and rows to `sink`, tallying the summary
///
/// The summary's duration is measured from `start`.
///
/// # Errors
///
/// Propagates I/O errors from the sink.
pub fn write_outcomes<W: Write>(
    sink: &mut CsvSink<W>,
    rows: &[InputRow],
    outcomes: &[RowOutcome],
    config: &RunConfig,
    start: Instant,
) -> Result<RunSummary> {
    let mut invalid_rows = 0;
    let mut unobservable_rows = 0;
    let mut map_histogram: FxHashMap<usize, usize> = FxHashMap::default();

    sink.write_header()?;

    for (row, outcome) in rows.iter().zip(outcomes) {
        match outcome {
            RowOutcome::Posterior(posterior) => {
                sink.write_posterior(&row.label, posterior)?;
                *map_histogram.entry(posterior.map_sum()).or_insert(0) += 1;
            }
            RowOutcome::Unobservable => {
                unobservable_rows += 1;
                warn!(line = row.line_number, sequence = %row.label, "unobservable sequence");
                if config.unobservable == UnobservablePolicy::Mark {
                    sink.write_unobservable(&row.label)?;
                }
            }
            RowOutcome::Invalid(e) => {
                invalid_rows += 1;
                warn!(line = row.line_number, "skipping row: {e}");
            }
        }
    }

    sink.flush()?;

    Ok(RunSummary {
        strategy: config.strategy.name(),
        rows_read: rows.len(),
        rows_written: sink.rows_written(),
        invalid_rows,
        unobservable_rows,
        map_histogram,
        duration: start.elapsed(),
    })
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::rows_from_str;
    use crate::model::build_model;

    fn quiet_config() -> RunConfig {
        let mut config = RunConfig::new("in.txt", "out.csv");
        config.show_progress = false;
        config
    }

    fn render(model: &DiceModel, input: &str, config: &RunConfig) -> (String, RunSummary) {
        let rows = rows_from_str(input);
        let outcomes = evaluate_rows(model, &rows, config);
        let mut sink = CsvSink::new(Vec::new(), model.domain());
        let summary = write_outcomes(&mut sink, &rows, &outcomes, config, Instant::now()).unwrap();
        (String::from_utf8(sink.into_inner()).unwrap(), summary)
    }

    #[test]
    fn writes_one_row_per_sequence() {
        let model = build_model(1, 6).unwrap();
        let (text, summary) = render(&model, "E\n\nHHHHHHHH\n", &quiet_config());

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("input,P(d=1),"));
        assert!(lines[1].starts_with("E,0.16667,"));
        assert!(lines[2].starts_with("HHHH...,"));
        assert!(lines[2].ends_with(",1"));

        assert_eq!(summary.rows_read, 2);
        assert_eq!(summary.rows_written, 2);
        assert_eq!(summary.map_histogram.get(&1), Some(&2));
    }

    #[test]
    fn duration_covers_inference_and_write() {
        let model = build_model(2, 6).unwrap();
        let config = quiet_config();
        let rows = rows_from_str("HH\nLE\n");

        let start = Instant::now();
        let outcomes = evaluate_rows(&model, &rows, &config);
        std::thread::sleep(Duration::from_millis(20));

        let mut sink = CsvSink::new(Vec::new(), model.domain());
        let summary = write_outcomes(&mut sink, &rows, &outcomes, &config, start).unwrap();
        assert!(summary.duration >= Duration::from_millis(20));
    }

    #[test]
    fn parallel_and_sequential_match() {
        let model = build_model(2, 6).unwrap();
        let input = "H\nHE\nLLE\nEEEL\nHLHLH\nLLLLLLLLLL\n";

        let mut sequential = quiet_config();
        sequential.parallel = false;

        let (a, _) = render(&model, input, &quiet_config());
        let (b, _) = render(&model, input, &sequential);
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_rows_are_rejected_unless_skipped() {
        let model = build_model(2, 6).unwrap();
        let rows = rows_from_str("HH\nHQ\n");
        let outcomes = evaluate_rows(&model, &rows, &quiet_config());

        let err = reject_invalid(&rows, &outcomes).unwrap_err();
        assert!(err.to_string().starts_with("line 2:"));

        let (text, summary) = render(&model, "HH\nHQ\n", &quiet_config());
        assert_eq!(summary.invalid_rows, 1);
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn unobservable_rows_follow_policy() {
        let model = build_model(1, 1).unwrap();

        let (marked, summary) = render(&model, "E\nH\n", &quiet_config());
        assert_eq!(summary.unobservable_rows, 1);
        assert_eq!(marked.lines().nth(2), Some("H,,unobservable"));

        let mut skip = quiet_config();
        skip.unobservable = UnobservablePolicy::Skip;
        let (skipped, summary) = render(&model, "E\nH\n", &skip);
        assert_eq!(summary.rows_written, 1);
        assert_eq!(skipped.lines().count(), 2);
    }
}
