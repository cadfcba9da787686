//! Command implementations

pub mod benchmark;
pub mod query;
pub mod run;
pub mod table;

pub use benchmark::{BenchmarkConfig, BenchmarkResult, run_benchmark};
pub use query::{QueryResult, query_sequence};
pub use run::{RunConfig, RunSummary, run_inference};
pub use table::{ModelSummary, TableRow, summarize_model};
