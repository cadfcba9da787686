//! Input row loading utilities
//!
//! Reads observation lines from files or strings. Lines are trimmed and empty
//! lines skipped; each row carries a short display label for output tables.

use crate::core::ObservationSequence;
use crate::error::ObservationError;
use std::fs;
use std::io;
use std::path::Path;

/// Rows longer than this are labelled by their first four characters plus "..."
pub const LABEL_WIDTH: usize = 7;

/// One non-empty input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    /// 1-based line number in the source
    pub line_number: usize,
    /// Trimmed line contents
    pub text: String,
    /// Display label (never affects inference)
    pub label: String,
}

impl InputRow {
    #[must_use]
    pub fn new(line_number: usize, text: &str) -> Self {
        Self {
            line_number,
            text: text.to_string(),
            label: display_label(text),
        }
    }

    /// Parse this row's text into an observation sequence
    ///
    /// # Errors
    /// Returns `ObservationError` if the text holds a symbol other than H, E, L.
    pub fn sequence(&self) -> Result<ObservationSequence, ObservationError> {
        ObservationSequence::parse(&self.text)
    }
}

/// Shorten a row for display
///
/// # Examples
/// ```
/// use dice_posterior::input::display_label;
///
/// assert_eq!(display_label("HHELLEH"), "HHELLEH");
/// assert_eq!(display_label("HHELLEHL"), "HHEL...");
/// ```
#[must_use]
pub fn display_label(text: &str) -> String {
    if text.chars().count() <= LABEL_WIDTH {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(4).collect();
        format!("{prefix}...")
    }
}

/// Split text into rows, skipping blank lines
#[must_use]
pub fn rows_from_str(content: &str) -> Vec<InputRow> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(InputRow::new(index + 1, trimmed))
            }
        })
        .collect()
}

/// Load rows from a file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
pub fn load_rows<P: AsRef<Path>>(path: P) -> io::Result<Vec<InputRow>> {
    let content = fs::read_to_string(path)?;
    Ok(rows_from_str(&content))
}
