//! Dice Posterior
//!
//! Infers the hidden sum of a roll of identical dice from a sequence of
//! Higher/Equal/Lower comparisons against fresh rolls.
//!
//! # Quick Start
//!
//! ```rust
//! use dice_posterior::inference::infer;
//! use dice_posterior::model::build_model;
//!
//! // Two six-sided dice
//! let model = build_model(2, 6).unwrap();
//!
//! // Three fresh rolls came out higher, one lower
//! let posterior = infer(&model, "HHHL").unwrap();
//! println!("Most likely sum: {}", posterior.map_sum());
//! ```

// Core domain types
pub mod core;

// Error types
pub mod error;

// Count table, prior, and observation model
pub mod model;

// Posterior computation
pub mod inference;

// Observation input rows
pub mod input;

// Command implementations
pub mod commands;

// Posterior table and terminal output
pub mod output;
