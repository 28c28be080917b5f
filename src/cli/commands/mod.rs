//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Each command is handed the stores
//! it needs, built from the resolved configuration, and does no file
//! discovery of its own.

pub mod add_movement;
pub mod add_set;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod export_summary;
pub mod find_movement;
pub mod import_movements;
pub mod init;
pub mod list_movements;
pub mod list_sets;
pub mod start_session;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
