//! Find-movement command implementation.
//!
//! The `liftlog find-movement --name <query>` command searches movement
//! names and ids for a substring, ignoring case. Finding nothing is not an
//! error.

use crate::catalog::MovementStore;
use crate::cli::args::FindMovementArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{movement_table, show_json};

/// The find-movement command implementation.
pub struct FindMovementCommand {
    catalog: MovementStore,
    args: FindMovementArgs,
}

impl FindMovementCommand {
    /// Create a new find-movement command.
    pub fn new(catalog: MovementStore, args: FindMovementArgs) -> Self {
        Self { catalog, args }
    }
}

impl Command for FindMovementCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let found = self
            .catalog
            .find(&self.args.name, self.args.category.as_deref())?;

        if self.args.json {
            show_json(ui, &found)?;
        } else if found.is_empty() {
            ui.message(&format!("No movements match '{}'", self.args.name.trim()));
        } else {
            ui.message(&movement_table(&found).render());
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Movement, MovementDraft};
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn seeded(temp: &TempDir) -> MovementStore {
        let store = MovementStore::new(temp.path().join("movements.csv"));
        store
            .add(MovementDraft::named("Barbell Bench Press"), false)
            .unwrap();
        store.add(MovementDraft::named("Back Squat"), false).unwrap();
        store
    }

    fn args(name: &str) -> FindMovementArgs {
        FindMovementArgs {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn finds_exactly_the_matching_movement() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let mut find = args("bench");
        find.json = true;

        FindMovementCommand::new(seeded(&temp), find)
            .execute(&mut ui)
            .unwrap();

        let parsed: Vec<Movement> = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, "barbell-bench-press");
        assert_eq!(parsed[0].name, "Barbell Bench Press");
    }

    #[test]
    fn no_match_is_success() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        let result = FindMovementCommand::new(seeded(&temp), args("curl"))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_message("No movements match 'curl'"));
    }

    #[test]
    fn table_output_lists_match() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();

        FindMovementCommand::new(seeded(&temp), args("SQUAT"))
            .execute(&mut ui)
            .unwrap();
        assert!(ui.has_message("back-squat"));
        assert!(!ui.has_message("barbell-bench-press"));
    }
}
