//! Add-movement command implementation.
//!
//! The `liftlog add-movement` command adds one movement to the catalog,
//! creating `movements.csv` if needed.

use crate::catalog::{MovementDraft, MovementStore};
use crate::cli::args::AddMovementArgs;
use crate::csv_table::split_list;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The add-movement command implementation.
pub struct AddMovementCommand {
    catalog: MovementStore,
    args: AddMovementArgs,
}

impl AddMovementCommand {
    /// Create a new add-movement command.
    pub fn new(catalog: MovementStore, args: AddMovementArgs) -> Self {
        Self { catalog, args }
    }

    fn draft(&self) -> MovementDraft {
        let args = &self.args;
        MovementDraft {
            id: args.id.clone(),
            name: args.name.clone(),
            category: args.category.clone().unwrap_or_default(),
            default_unit: args.unit.clone().unwrap_or_default(),
            primary_muscle: args.primary_muscle.clone().unwrap_or_default(),
            secondary_muscles: args
                .secondary_muscles
                .as_deref()
                .map(split_list)
                .unwrap_or_default(),
            notes: args.notes.clone().unwrap_or_default(),
        }
    }
}

impl Command for AddMovementCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let outcome = self.catalog.add(self.draft(), self.args.overwrite)?;
        let verb = if outcome.replaced { "Replaced" } else { "Added" };

        ui.success(&format!(
            "{} movement {} ({})",
            verb, outcome.movement.name, outcome.movement.id
        ));
        // The id alone on stdout, for scripts.
        ui.message(&outcome.movement.id);

        Ok(CommandResult::success())
    }
}
