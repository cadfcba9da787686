//! Posterior output
//!
//! The delimited posterior table and console display utilities.

pub mod csv;
pub mod display;
pub mod formatters;

pub use csv::{CsvSink, UNOBSERVABLE_MARKER, UnobservablePolicy};
pub use display::{
    print_benchmark_result, print_model_summary, print_query_result, print_run_summary,
};
