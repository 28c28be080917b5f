//! Command-line interface for liftlog.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    AddMovementArgs, AddSetArgs, Cli, Commands, CompletionsArgs, ExportSummaryArgs,
    FindMovementArgs, ImportMovementsArgs, InitArgs, ListMovementsArgs, ListSetsArgs,
    StartSessionArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
