//! Add-set command implementation.
//!
//! The `liftlog add-set` command appends one validated row to
//! `workouts.csv`. The movement is named by `--movement_id`, or by
//! `--movement_name` with `--create-missing` to add it on the fly.

use chrono::Local;

use crate::archive::{is_known_set_type, SetArchive, SetInput};
use crate::catalog::{slugify, MovementDraft, MovementStore};
use crate::cli::args::AddSetArgs;
use crate::csv_table::split_list;
use crate::error::{LiftlogError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// How the set's movement will be found.
enum MovementRef {
    /// Already in the catalog (or named by id, checked on append).
    Existing(String),
    /// Named by `--movement_name`, to be added before appending.
    Create(MovementDraft),
}

impl MovementRef {
    fn id(&self) -> String {
        match self {
            Self::Existing(id) => id.clone(),
            Self::Create(draft) => slugify(&draft.name),
        }
    }
}

/// The add-set command implementation.
pub struct AddSetCommand {
    catalog: MovementStore,
    archive: SetArchive,
    rpe_max: f64,
    args: AddSetArgs,
}

impl AddSetCommand {
    /// Create a new add-set command.
    pub fn new(catalog: MovementStore, archive: SetArchive, rpe_max: f64, args: AddSetArgs) -> Self {
        Self {
            catalog,
            archive,
            rpe_max,
            args,
        }
    }

    fn movement_ref(&self) -> Result<MovementRef> {
        let id = self.args.movement_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
        if let Some(id) = id {
            return Ok(MovementRef::Existing(id.to_string()));
        }

        let name = self.args.movement_name.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let Some(name) = name else {
            return Err(LiftlogError::invalid(
                "movement_id",
                "required (or give --movement_name)",
            ));
        };

        match self.catalog.find_by_name(name)? {
            Some(movement) => Ok(MovementRef::Existing(movement.id)),
            None if self.args.create_missing => {
                let mut draft = MovementDraft::named(name);
                draft.default_unit = self.args.unit.clone().unwrap_or_default();
                Ok(MovementRef::Create(draft))
            }
            None => Err(LiftlogError::MovementNotFound {
                id: name.to_string(),
            }),
        }
    }

    fn input(&self, movement_id: String) -> SetInput {
        let args = &self.args;
        SetInput {
            workout_id: args.workout_id.clone(),
            date: args.date.clone(),
            start_time: args.start_time.clone(),
            movement_id,
            set_number: args.set_number.clone(),
            set_type: args.set_type.clone(),
            cluster_id: args.cluster_id.clone(),
            reps: args.reps.clone(),
            load: args.load.clone(),
            unit: args.unit.clone(),
            rest_seconds: args.rest_seconds.clone(),
            rpe: args.rpe.clone(),
            tags: args.tags.as_deref().map(split_list).unwrap_or_default(),
            notes: args.notes.clone(),
        }
    }
}

impl Command for AddSetCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let movement = self.movement_ref()?;
        let set = self
            .input(movement.id())
            .validate(Local::now().naive_local(), self.rpe_max)?;

        if !is_known_set_type(&set.set_type) {
            ui.warning(&format!(
                "set_type '{}' is not a known set type, storing it anyway",
                set.set_type
            ));
        }

        if let MovementRef::Create(draft) = movement {
            // A new catalog row is only written when the set can follow it.
            self.archive.check_header()?;
            let outcome = self.catalog.add(draft, false)?;
            ui.success(&format!(
                "Added movement {} ({})",
                outcome.movement.name, outcome.movement.id
            ));
        }

        let record = self.archive.append(&self.catalog, set)?;
        ui.message(&format!(
            "Appended set: {} {} set {}",
            record.workout_id, record.movement_name, record.set_number
        ));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Reps;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        catalog: MovementStore,
        archive: SetArchive,
    }

    fn fixture() -> Fixture {
        let temp = TempDir::new().unwrap();
        let catalog = MovementStore::new(temp.path().join("movements.csv"));
        let archive = SetArchive::new(temp.path().join("workouts.csv"));
        let mut bench = MovementDraft::named("Barbell Bench Press");
        bench.default_unit = "kg".to_string();
        catalog.add(bench, false).unwrap();
        archive.init().unwrap();
        Fixture {
            _temp: temp,
            catalog,
            archive,
        }
    }

    fn bench_set() -> AddSetArgs {
        AddSetArgs {
            movement_id: Some("barbell-bench-press".to_string()),
            workout_id: Some("w1".to_string()),
            set_number: "1".to_string(),
            reps: Some("5".to_string()),
            load: Some("100".to_string()),
            unit: Some("kg".to_string()),
            ..Default::default()
        }
    }

    fn run(f: &Fixture, args: AddSetArgs, ui: &mut MockUI) -> Result<CommandResult> {
        AddSetCommand::new(f.catalog.clone(), f.archive.clone(), 10.0, args).execute(ui)
    }

    #[test]
    fn appends_one_row() {
        let f = fixture();
        let mut ui = MockUI::new();

        assert!(run(&f, bench_set(), &mut ui).unwrap().success);

        let sets = f.archive.list().unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].movement_name, "Barbell Bench Press");
        assert_eq!(sets[0].reps, Some(Reps::Count(5)));
        assert_eq!(sets[0].load, Some(100.0));
        assert_eq!(sets[0].set_type, "work");
        assert!(ui.has_message("Appended set: w1 Barbell Bench Press set 1"));
    }

    #[test]
    fn unknown_movement_leaves_archive_unchanged() {
        let f = fixture();
        let before = fs::read_to_string(f.archive.path()).unwrap();
        let mut ui = MockUI::new();
        let mut args = bench_set();
        args.movement_id = Some("front-squat".to_string());

        let err = run(&f, args, &mut ui).unwrap_err();

        assert!(matches!(err, LiftlogError::MovementNotFound { .. }));
        assert_eq!(fs::read_to_string(f.archive.path()).unwrap(), before);
    }

    #[test]
    fn reports_every_invalid_field() {
        let f = fixture();
        let mut ui = MockUI::new();
        let mut args = bench_set();
        args.set_number = "0".to_string();
        args.reps = Some("five".to_string());
        args.rpe = Some("11".to_string());

        let err = run(&f, args, &mut ui).unwrap_err();
        match err {
            LiftlogError::Validation { errors } => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["set_number", "reps", "rpe"]);
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
        assert!(f.archive.list().unwrap().is_empty());
    }

    #[test]
    fn movement_is_required() {
        let f = fixture();
        let mut ui = MockUI::new();
        let mut args = bench_set();
        args.movement_id = None;

        let err = run(&f, args, &mut ui).unwrap_err();
        assert!(err.to_string().contains("movement_id"));
    }

    #[test]
    fn resolves_movement_by_name() {
        let f = fixture();
        let mut ui = MockUI::new();
        let mut args = bench_set();
        args.movement_id = None;
        args.movement_name = Some("barbell bench press".to_string());

        run(&f, args, &mut ui).unwrap();
        assert_eq!(f.archive.list().unwrap()[0].movement_id, "barbell-bench-press");
    }

    #[test]
    fn unknown_name_without_create_missing_is_not_found() {
        let f = fixture();
        let mut ui = MockUI::new();
        let mut args = bench_set();
        args.movement_id = None;
        args.movement_name = Some("Pendlay Row".to_string());

        let err = run(&f, args, &mut ui).unwrap_err();
        assert!(matches!(err, LiftlogError::MovementNotFound { .. }));
        assert!(f.catalog.find_by_name("Pendlay Row").unwrap().is_none());
    }

    #[test]
    fn create_missing_adds_movement_then_set() {
        let f = fixture();
        let mut ui = MockUI::new();
        let mut args = bench_set();
        args.movement_id = None;
        args.movement_name = Some("Pendlay Row".to_string());
        args.create_missing = true;
        args.unit = Some("lb".to_string());

        run(&f, args, &mut ui).unwrap();

        assert_eq!(f.catalog.resolve("pendlay-row").unwrap().default_unit, "lb");
        assert_eq!(f.archive.list().unwrap()[0].movement_id, "pendlay-row");
        assert!(ui.has_success("Added movement Pendlay Row"));
    }

    #[test]
    fn create_missing_does_not_add_movement_for_invalid_set() {
        let f = fixture();
        let mut ui = MockUI::new();
        let mut args = bench_set();
        args.movement_id = None;
        args.movement_name = Some("Pendlay Row".to_string());
        args.create_missing = true;
        args.load = Some("heavy".to_string());

        assert!(run(&f, args, &mut ui).is_err());
        assert!(f.catalog.find_by_name("Pendlay Row").unwrap().is_none());
    }

    #[test]
    fn create_missing_does_not_add_movement_for_malformed_archive() {
        let f = fixture();
        fs::write(f.archive.path(), "workout,date,reps\n").unwrap();
        let mut ui = MockUI::new();
        let mut args = bench_set();
        args.movement_id = None;
        args.movement_name = Some("Pendlay Row".to_string());
        args.create_missing = true;

        let err = run(&f, args, &mut ui).unwrap_err();

        assert!(matches!(err, LiftlogError::MalformedCsv { .. }));
        assert!(f.catalog.find_by_name("Pendlay Row").unwrap().is_none());
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn unknown_set_type_warns_but_stores() {
        let f = fixture();
        let mut ui = MockUI::new();
        let mut args = bench_set();
        args.set_type = Some("Cluster".to_string());

        run(&f, args, &mut ui).unwrap();

        assert!(ui.has_warning("'cluster'"));
        assert_eq!(f.archive.list().unwrap()[0].set_type, "cluster");
    }

    #[test]
    fn unit_falls_back_to_movement_default() {
        let f = fixture();
        let mut ui = MockUI::new();
        let mut args = bench_set();
        args.unit = None;
        args.tags = Some("paused, belt".to_string());

        run(&f, args, &mut ui).unwrap();

        let set = &f.archive.list().unwrap()[0];
        assert_eq!(set.unit, "kg");
        assert_eq!(set.tags, vec!["paused", "belt"]);
    }
}
