//! liftlog - workout logging in plain CSV files.
//!
//! liftlog keeps a movement catalog (`movements.csv`) and an append-only
//! archive of performed sets (`workouts.csv`) in one data directory, with a
//! CLI for adding, finding, logging and summarizing.
//!
//! # Modules
//!
//! - [`archive`] - Set records, validation and summary export
//! - [`catalog`] - Movement catalog, slugs and bulk import
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Data directory and settings file
//! - [`csv_table`] - Header-checked CSV files with atomic rewrites
//! - [`error`] - Error types and result aliases
//! - [`session`] - Interactive logging loop
//! - [`ui`] - Prompts, tables and terminal output
//!
//! # Example
//!
//! ```
//! use liftlog::catalog::slugify;
//!
//! assert_eq!(slugify("Barbell Bench Press"), "barbell-bench-press");
//! ```
//!
//! For file-based workflows, see the integration tests.

pub mod archive;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod csv_table;
pub mod error;
pub mod session;
pub mod ui;

pub use error::{LiftlogError, Result};
