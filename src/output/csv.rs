//! Delimited posterior table
//!
//! Layout: `input,P(d=lb),…,P(d=ub),guess`, every column but the last
//! followed by a comma, probabilities with five decimals.

use crate::core::SumDomain;
use crate::inference::Posterior;
use std::io::{self, Write};

/// Guess-column value for rows whose sequence is unobservable
pub const UNOBSERVABLE_MARKER: &str = "unobservable";

/// What to emit for a row whose sequence is unobservable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnobservablePolicy {
    /// Leave the row out of the table
    Skip,
    /// Write empty probability cells and a marker in the guess column
    #[default]
    Mark,
}

impl UnobservablePolicy {
    /// Create policy from name string
    ///
    /// Supported names: "skip", "mark". Defaults to mark if unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "skip" => Self::Skip,
            _ => Self::Mark,
        }
    }
}

/// Writes one row per posterior to any `Write`
pub struct CsvSink<W: Write> {
    writer: W,
    domain: SumDomain,
    rows_written: usize,
}

impl<W: Write> CsvSink<W> {
    pub const fn new(writer: W, domain: SumDomain) -> Self {
        Self {
            writer,
            domain,
            rows_written: 0,
        }
    }

    /// # Errors
    /// Propagates I/O errors from the underlying writer.
    pub fn write_header(&mut self) -> io::Result<()> {
        write!(self.writer, "input,")?;
        for sum in self.domain.sums() {
            write!(self.writer, "P(d={sum}),")?;
        }
        writeln!(self.writer, "guess")
    }

    /// # Errors
    /// Propagates I/O errors from the underlying writer.
    pub fn write_posterior(&mut self, label: &str, posterior: &Posterior) -> io::Result<()> {
        write!(self.writer, "{label},")?;
        for (_, probability) in posterior.iter() {
            write!(self.writer, "{probability:.5},")?;
        }
        writeln!(self.writer, "{}", posterior.map_sum())?;
        self.rows_written += 1;
        Ok(())
    }

    /// # Errors
    /// Propagates I/O errors from the underlying writer.
    pub fn write_unobservable(&mut self, label: &str) -> io::Result<()> {
        write!(self.writer, "{label},")?;
        for _ in self.domain.sums() {
            write!(self.writer, ",")?;
        }
        writeln!(self.writer, "{UNOBSERVABLE_MARKER}")?;
        self.rows_written += 1;
        Ok(())
    }

    #[must_use]
    pub const fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// # Errors
    /// Propagates I/O errors from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
