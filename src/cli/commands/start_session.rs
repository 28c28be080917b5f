//! Start-session command implementation.
//!
//! The `liftlog start-session` command runs the interactive logging loop.
//! Every set is appended as soon as it is entered, so stopping early (or
//! closing stdin) keeps everything logged so far.

use crate::archive::SetArchive;
use crate::catalog::MovementStore;
use crate::cli::args::StartSessionArgs;
use crate::config::Settings;
use crate::error::{LiftlogError, Result};
use crate::session::{Session, SessionOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The start-session command implementation.
pub struct StartSessionCommand {
    catalog: MovementStore,
    archive: SetArchive,
    options: SessionOptions,
}

impl StartSessionCommand {
    /// Create a new start-session command.
    pub fn new(
        catalog: MovementStore,
        archive: SetArchive,
        settings: &Settings,
        args: StartSessionArgs,
    ) -> Self {
        Self {
            catalog,
            archive,
            options: SessionOptions {
                workout_id: args.workout_id,
                date: args.date,
                rpe_max: settings.rpe_max,
                default_unit: settings.default_unit.clone(),
            },
        }
    }
}

impl Command for StartSessionCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.catalog.exists() {
            return Err(LiftlogError::FileNotFound {
                path: self.catalog.path().to_path_buf(),
            });
        }

        let mut session = Session::new(&self.catalog, &self.archive, self.options.clone());
        let summary = session.run(ui)?;

        ui.message(&format!(
            "Logged {} sets in workout {}",
            summary.sets_logged, summary.workout_id
        ));

        Ok(CommandResult::success())
    }
}
