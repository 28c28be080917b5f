//! Import-movements command implementation.
//!
//! The `liftlog import-movements --path <file>` command bulk-loads a CSV or
//! TSV file. Rows that fail are reported with their line numbers; the rest
//! are still imported and the command exits 0.

use crate::catalog::{import_movements, MovementStore};
use crate::cli::args::ImportMovementsArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The import-movements command implementation.
pub struct ImportMovementsCommand {
    catalog: MovementStore,
    args: ImportMovementsArgs,
}

impl ImportMovementsCommand {
    /// Create a new import-movements command.
    pub fn new(catalog: MovementStore, args: ImportMovementsArgs) -> Self {
        Self { catalog, args }
    }
}

impl Command for ImportMovementsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = import_movements(&self.catalog, &self.args.path)?;

        for row in &report.errors {
            ui.warning(&format!("line {}: {}", row.line, row.message));
        }
        if ui.output_mode().shows_details() {
            for m in &report.inserted {
                ui.message(&format!("  + {} ({})", m.name, m.id));
            }
        }

        ui.message(&format!(
            "Imported {} movements ({} skipped, {} errors)",
            report.inserted_count(),
            report.skipped,
            report.error_count()
        ));

        Ok(CommandResult::success())
    }
}
