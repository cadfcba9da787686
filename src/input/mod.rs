//! Observation input rows
//!
//! One observation sequence per line of a text source.

pub mod loader;

pub use loader::{InputRow, LABEL_WIDTH, display_label, load_rows, rows_from_str};
