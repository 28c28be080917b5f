//! List-sets command implementation.
//!
//! The `liftlog list-sets` command prints logged sets, optionally only
//! those of one workout, in the order they were logged.

use crate::archive::SetArchive;
use crate::cli::args::ListSetsArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{set_table, show_json};

/// The list-sets command implementation.
pub struct ListSetsCommand {
    archive: SetArchive,
    args: ListSetsArgs,
}

impl ListSetsCommand {
    /// Create a new list-sets command.
    pub fn new(archive: SetArchive, args: ListSetsArgs) -> Self {
        Self { archive, args }
    }
}

impl Command for ListSetsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let workout = self
            .args
            .workout_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let sets = match workout {
            Some(id) => self.archive.list_for_workout(id)?,
            None => self.archive.list()?,
        };

        if self.args.json {
            show_json(ui, &sets)?;
        } else if sets.is_empty() {
            match workout {
                Some(id) => ui.message(&format!("No sets logged for workout {}", id)),
                None => ui.message("No sets logged yet."),
            }
        } else {
            ui.message(&set_table(&sets).render());
            ui.success(&format!("{} sets", sets.len()));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::SetInput;
    use crate::catalog::{MovementDraft, MovementStore};
    use crate::error::LiftlogError;
    use crate::ui::MockUI;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn seeded(temp: &TempDir) -> SetArchive {
        let catalog = MovementStore::new(temp.path().join("movements.csv"));
        catalog.add(MovementDraft::named("Deadlift"), false).unwrap();
        let archive = SetArchive::new(temp.path().join("workouts.csv"));
        let now = NaiveDate::from_ymd_opt(2025, 2, 3)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        for (workout, n) in [("w1", "1"), ("w1", "2"), ("w2", "1")] {
            let input = SetInput {
                workout_id: Some(workout.to_string()),
                movement_id: "deadlift".to_string(),
                set_number: n.to_string(),
                reps: Some("3".to_string()),
                load: Some("180".to_string()),
                ..Default::default()
            };
            archive
                .append(&catalog, input.validate(now, 10.0).unwrap())
                .unwrap();
        }
        archive
    }

    #[test]
    fn lists_all_sets() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ListSetsCommand::new(seeded(&temp), ListSetsArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert!(ui.has_message("Deadlift"));
        assert!(ui.has_success("3 sets"));
    }

    #[test]
    fn filters_by_workout_as_json() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let args = ListSetsArgs {
            workout_id: Some("w1".to_string()),
            json: true,
        };
        ListSetsCommand::new(seeded(&temp), args)
            .execute(&mut ui)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        let sets = parsed.as_array().unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[1]["set_number"], 2);
        assert_eq!(sets[0]["reps"], 3);
    }

    #[test]
    fn unknown_workout_is_empty() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let args = ListSetsArgs {
            workout_id: Some("nope".to_string()),
            json: false,
        };
        ListSetsCommand::new(seeded(&temp), args)
            .execute(&mut ui)
            .unwrap();
        assert!(ui.has_message("No sets logged for workout nope"));
    }

    #[test]
    fn missing_archive_is_a_file_error() {
        let temp = TempDir::new().unwrap();
        let archive = SetArchive::new(temp.path().join("workouts.csv"));
        let mut ui = MockUI::new();
        let err = ListSetsCommand::new(archive, ListSetsArgs::default())
            .execute(&mut ui)
            .unwrap_err();
        assert!(matches!(err, LiftlogError::FileNotFound { .. }));
    }
}
