//! List-movements command implementation.
//!
//! The `liftlog list-movements` command prints the catalog.

use crate::catalog::{Movement, MovementStore};
use crate::cli::args::ListMovementsArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{movement_table, show_json};

/// The list-movements command implementation.
pub struct ListMovementsCommand {
    catalog: MovementStore,
    args: ListMovementsArgs,
}

impl ListMovementsCommand {
    /// Create a new list-movements command.
    pub fn new(catalog: MovementStore, args: ListMovementsArgs) -> Self {
        Self { catalog, args }
    }
}

impl Command for ListMovementsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let movements: Vec<Movement> = self
            .catalog
            .list()?
            .into_iter()
            .filter(|m| {
                self.args
                    .category
                    .as_deref()
                    .map_or(true, |c| m.category.eq_ignore_ascii_case(c.trim()))
            })
            .collect();

        if self.args.json {
            show_json(ui, &movements)?;
        } else if movements.is_empty() {
            ui.message("No movements in the catalog yet.");
        } else {
            ui.message(&movement_table(&movements).render());
            ui.success(&format!("{} movements", movements.len()));
        }

        Ok(CommandResult::success())
    }
}
