//! Init command implementation.
//!
//! The `liftlog init` command creates both data files with their headers.
//! Existing files are left untouched unless `--fail-if-exists` turns that
//! into an error.

use crate::archive::SetArchive;
use crate::catalog::MovementStore;
use crate::cli::args::InitArgs;
use crate::error::{LiftlogError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    catalog: MovementStore,
    archive: SetArchive,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(catalog: MovementStore, archive: SetArchive, args: InitArgs) -> Self {
        Self {
            catalog,
            archive,
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InitArgs {
        &self.args
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.fail_if_exists {
            for path in [self.catalog.path(), self.archive.path()] {
                if path.exists() {
                    return Err(LiftlogError::AlreadyExists {
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        let created = [
            (self.catalog.path().display().to_string(), self.catalog.init()?),
            (self.archive.path().display().to_string(), self.archive.init()?),
        ];

        for (path, was_created) in &created {
            if *was_created {
                ui.success(&format!("Created {}", path));
            } else {
                ui.message(&format!("{} already exists, left unchanged", path));
            }
        }

        Ok(CommandResult::success())
    }
}
