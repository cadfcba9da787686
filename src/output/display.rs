//! Display functions for command results

use super::formatters::{create_progress_bar, format_log, probability_bar};
use crate::commands::{BenchmarkResult, ModelSummary, QueryResult, RunSummary};
use crate::inference::Posterior;
use colored::Colorize;

/// Print the count table, prior, and observation lookup table
///
/// With `log` set, the lookup table shows natural logs instead of probabilities.
pub fn print_model_summary(summary: &ModelSummary, log: bool) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "DICE MODEL:".bright_cyan().bold(),
        summary.config.to_string().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n🎲 Domain:   {}", summary.domain);
    println!("   Outcomes: {}", summary.outcomes);
    println!("   Mean:     {:.3}", summary.mean);

    let max_count = summary.rows.iter().map(|r| r.count).max().unwrap_or(1);

    println!("\n📊 {}", "How many ways".bright_cyan().bold());
    for row in &summary.rows {
        let bar = create_progress_bar(row.count as f64, max_count as f64, 30);
        println!(
            "   {:>4}: {} {:>8}  P={:.5}",
            row.sum,
            bar.green(),
            row.count,
            row.prior
        );
    }

    println!("\n📋 {}", "Lookup Table".bright_cyan().bold());
    for row in &summary.rows {
        if log {
            let [h, e, l] = row.log_observation.map(format_log);
            println!("   d={:<4} log(P(H))={h:>9} log(P(E))={e:>9} log(P(L))={l:>9}", row.sum);
        } else {
            let [h, e, l] = row.observation;
            println!("   d={:<4} P(H)={h:.5} P(E)={e:.5} P(L)={l:.5}", row.sum);
        }
    }
}

/// Print a single query's posterior
pub fn print_query_result(result: &QueryResult) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Sequence: {} ({} observations, {} engine)",
        result.sequence.to_string().bright_yellow().bold(),
        result.sequence.len(),
        result.strategy
    );
    println!(
        "H: {}  E: {}  L: {}",
        result.symbol_counts.higher, result.symbol_counts.equal, result.symbol_counts.lower
    );
    println!("{}", "─".repeat(60).cyan());

    print_posterior(&result.posterior);

    if let Some(agreement) = &result.agreement {
        println!("\n🔍 {}", "Engine comparison".bright_cyan().bold());
        match agreement.max_difference() {
            Some(diff) => println!("   Max |Δp|:   {diff:.3e}"),
            None if agreement.direct_underflowed() => {
                println!("   {}", "Direct engine underflowed".yellow());
            }
            None => println!("   {}", "An engine found the sequence unobservable".yellow()),
        }
        if agreement.map_agrees() {
            println!("   {}", "✅ MAP estimates agree".green().bold());
        } else {
            println!("   {}", "❌ MAP estimates differ".red().bold());
        }
    }
}

fn print_posterior(posterior: &Posterior) {
    println!();
    for (sum, probability) in posterior.iter() {
        let line = format!(
            "   {:>4}: {} {:.5}",
            sum,
            probability_bar(probability, 40),
            probability
        );
        if sum == posterior.map_sum() {
            println!("{}", line.bright_green().bold());
        } else {
            println!("{line}");
        }
    }

    println!(
        "\n   MAP estimate: {} (p = {:.5})",
        posterior.map_sum().to_string().bright_yellow().bold(),
        posterior.map_probability()
    );
    println!("   log P(seq):   {:.5}", posterior.log_evidence());
}

/// Print the summary of a batch run
pub fn print_run_summary(summary: &RunSummary) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "RUN SUMMARY".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Rows:".bright_cyan().bold());
    println!("   Engine:        {}", summary.strategy);
    println!("   Read:          {}", summary.rows_read);
    println!("   Written:       {}", summary.rows_written.to_string().green());
    if summary.invalid_rows > 0 {
        println!("   Invalid:       {}", summary.invalid_rows.to_string().red());
    }
    if summary.unobservable_rows > 0 {
        println!(
            "   Unobservable:  {}",
            summary.unobservable_rows.to_string().yellow()
        );
    }
    println!("   Time taken:    {:.2}s", summary.duration.as_secs_f64());

    if summary.map_histogram.is_empty() {
        return;
    }

    println!("\n📈 {}", "MAP distribution:".bright_cyan().bold());
    let total: usize = summary.map_histogram.values().sum();
    let mut sums: Vec<_> = summary.map_histogram.iter().collect();
    sums.sort_unstable_by_key(|&(sum, _)| *sum);

    for (sum, &count) in sums {
        let pct = count as f64 / total as f64 * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░".repeat(40_usize.saturating_sub(bar_width)).bright_black()
        );
        println!("   {sum:>4}: {bar} {count:4} ({pct:5.1}%)");
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Rounds:             {}", result.rounds);
    println!("   Observations/round: {}", result.observations);
    println!("   Seed:               {}", result.seed);
    println!(
        "   Log-domain accuracy: {}",
        format!("{:.1}%", result.log_domain_accuracy() * 100.0)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Direct accuracy:     {}",
        format!("{:.1}%", result.direct_accuracy() * 100.0).yellow()
    );
    println!(
        "   Engine agreement:    {}",
        format!("{:.1}%", result.agreement_rate() * 100.0).green()
    );
    if result.direct_underflows > 0 {
        println!(
            "   Direct underflows:   {}",
            result.direct_underflows.to_string().red()
        );
    }
    if result.unobservable > 0 {
        println!("   Unobservable:        {}", result.unobservable);
    }
    println!("   Time taken:          {:.2}s", result.duration.as_secs_f64());
    println!("   Rounds/second:       {:.1}", result.rounds_per_second);

    println!("\n📈 {}", "|MAP - hidden sum|:".bright_cyan().bold());
    let mut errors: Vec<_> = result.error_distribution.iter().collect();
    errors.sort_unstable_by_key(|&(error, _)| *error);
    for (error, &count) in errors {
        let pct = count as f64 / result.rounds as f64 * 100.0;
        let bar_width = (pct / 2.5) as usize;
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░".repeat(40_usize.saturating_sub(bar_width)).bright_black()
        );
        println!("   {error:>4}: {bar} {count:4} ({pct:5.1}%)");
    }
}
