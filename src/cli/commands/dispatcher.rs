//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::archive::SetArchive;
use crate::catalog::MovementStore;
use crate::cli::args::{Cli, Commands};
use crate::config::Config;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: Config,
}

impl CommandDispatcher {
    /// Create a new dispatcher over the resolved configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Movement catalog at the configured path.
    pub fn catalog(&self) -> MovementStore {
        MovementStore::new(self.config.movements_path())
    }

    /// Set archive at the configured path.
    pub fn archive(&self) -> SetArchive {
        SetArchive::new(self.config.workouts_path())
            .with_default_unit(self.config.settings.default_unit.clone())
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        tracing::debug!("Dispatching {:?}", cli.command);
        match &cli.command {
            Commands::Init(args) => {
                let cmd = super::init::InitCommand::new(
                    self.catalog(),
                    self.archive(),
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::ListMovements(args) => {
                let cmd =
                    super::list_movements::ListMovementsCommand::new(self.catalog(), args.clone());
                cmd.execute(ui)
            }
            Commands::FindMovement(args) => {
                let cmd =
                    super::find_movement::FindMovementCommand::new(self.catalog(), args.clone());
                cmd.execute(ui)
            }
            Commands::AddMovement(args) => {
                let cmd =
                    super::add_movement::AddMovementCommand::new(self.catalog(), args.clone());
                cmd.execute(ui)
            }
            Commands::ImportMovements(args) => {
                let cmd = super::import_movements::ImportMovementsCommand::new(
                    self.catalog(),
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::AddSet(args) => {
                let cmd = super::add_set::AddSetCommand::new(
                    self.catalog(),
                    self.archive(),
                    self.config.settings.rpe_max,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::ListSets(args) => {
                let cmd = super::list_sets::ListSetsCommand::new(self.archive(), args.clone());
                cmd.execute(ui)
            }
            Commands::StartSession(args) => {
                let cmd = super::start_session::StartSessionCommand::new(
                    self.catalog(),
                    self.archive(),
                    &self.config.settings,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::ExportSummary(args) => {
                let cmd = super::export_summary::ExportSummaryCommand::new(
                    self.archive(),
                    self.config.summary_path(),
                    args.clone(),
                )
                .protecting([self.config.movements_path(), self.config.workouts_path()]);
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
