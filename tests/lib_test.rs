//! Library integration tests.

use std::fs;

use chrono::NaiveDate;
use liftlog::archive::{export_summary, GroupBy, SetArchive, SetInput, SummaryFilter};
use liftlog::catalog::{import_movements, slugify, MovementDraft, MovementStore};
use liftlog::config::{load_config, Settings};
use liftlog::session::{Session, SessionOptions};
use liftlog::ui::MockUI;
use liftlog::LiftlogError;
use tempfile::TempDir;

fn stores(temp: &TempDir) -> (MovementStore, SetArchive) {
    (
        MovementStore::new(temp.path().join("movements.csv")),
        SetArchive::new(temp.path().join("workouts.csv")),
    )
}

fn set(workout: &str, movement: &str, n: u32, reps: &str, load: &str) -> SetInput {
    SetInput {
        workout_id: Some(workout.to_string()),
        date: Some("2025-05-02".to_string()),
        movement_id: movement.to_string(),
        set_number: n.to_string(),
        reps: Some(reps.to_string()),
        load: Some(load.to_string()),
        ..Default::default()
    }
}

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 5, 2)
        .unwrap()
        .and_hms_opt(6, 30, 0)
        .unwrap()
}

#[test]
fn error_types_are_public() {
    let err = LiftlogError::MovementNotFound {
        id: "front-squat".into(),
    };
    assert!(err.to_string().contains("front-squat"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> liftlog::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use liftlog::cli::{Cli, Commands};

    let cli = Cli::parse_from(["liftlog", "list-sets", "--workout-id", "w1", "--json"]);
    if let Commands::ListSets(args) = cli.command {
        assert!(args.json);
        assert_eq!(args.workout_id.as_deref(), Some("w1"));
    } else {
        panic!("Expected ListSets command");
    }
}

#[test]
fn slugify_is_idempotent() {
    for name in ["Barbell Bench Press", "  Pull-Up (weighted) ", "ÜBER squat"] {
        let once = slugify(name);
        assert_eq!(slugify(&once), once);
    }
}

#[test]
fn appended_sets_are_counted_and_ordered() {
    let temp = TempDir::new().unwrap();
    let (catalog, archive) = stores(&temp);
    catalog.add(MovementDraft::named("Overhead Press"), false).unwrap();
    archive.init().unwrap();

    for n in 1..=4 {
        let new_set = set("w1", "overhead-press", n, "5", "50").validate(now(), 10.0).unwrap();
        // Same clock reading every time: created_at must still advance.
        archive.append_at(&catalog, new_set, now()).unwrap();
    }

    let sets = archive.list().unwrap();
    assert_eq!(sets.len(), 4);
    assert!(sets.windows(2).all(|w| w[0].created_at < w[1].created_at));
    assert_eq!(archive.last_set_number("w1", "overhead-press").unwrap(), 4);
}

#[test]
fn workout_and_movement_summaries() {
    let temp = TempDir::new().unwrap();
    let (catalog, archive) = stores(&temp);
    catalog.add(MovementDraft::named("Bench"), false).unwrap();
    catalog.add(MovementDraft::named("Row"), false).unwrap();
    for input in [
        set("w1", "bench", 1, "5", "100"),
        set("w1", "bench", 2, "5", "100"),
        set("w1", "row", 1, "8", "60"),
    ] {
        archive
            .append(&catalog, input.validate(now(), 10.0).unwrap())
            .unwrap();
    }

    let by_workout = temp.path().join("by-workout.csv");
    let report = export_summary(
        &archive,
        &by_workout,
        GroupBy::Workout,
        &SummaryFilter::default(),
    )
    .unwrap();
    assert_eq!(report.rows, 1);
    assert_eq!(report.sets, 3);
    let content = fs::read_to_string(&by_workout).unwrap();
    assert!(content.starts_with("workout_id,date,sets,total_reps,movements_summary"));
    assert!(content.contains("w1,2025-05-02,3,18,"));

    let by_movement = temp.path().join("by-movement.csv");
    let filter = SummaryFilter {
        movement_id: Some("bench".to_string()),
        ..Default::default()
    };
    export_summary(&archive, &by_movement, GroupBy::Movement, &filter).unwrap();
    let content = fs::read_to_string(&by_movement).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("bench,Bench,"));
    assert!(lines[1].contains(",2,10,1000,100"));
}

#[test]
fn import_then_session() {
    let temp = TempDir::new().unwrap();
    let (catalog, archive) = stores(&temp);
    let file = temp.path().join("import.csv");
    fs::write(&file, "name,category,default_unit\nKettlebell Swing,hinge,kg\n").unwrap();
    let report = import_movements(&catalog, &file).unwrap();
    assert_eq!(report.inserted_count(), 1);

    let mut ui = MockUI::new();
    ui.close_when_exhausted();
    ui.queue_prompt_responses("movement", vec!["swing", "done"]);
    ui.queue_prompt_responses("reps", vec!["20"]);
    ui.queue_prompt_responses("load", vec!["24"]);
    ui.queue_prompt_responses("next_action", vec!["new"]);

    let options = SessionOptions {
        workout_id: Some("kb".to_string()),
        ..Default::default()
    };
    let summary = Session::new(&catalog, &archive, options).run(&mut ui).unwrap();

    assert_eq!(summary.sets_logged, 1);
    assert_eq!(summary.movements, vec!["kettlebell-swing".to_string()]);
    let sets = archive.list_for_workout("kb").unwrap();
    assert_eq!(sets[0].unit, "kg");
}

#[test]
fn config_reads_settings_next_to_data() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("liftlog.yml"),
        "workouts_file: log.csv\nrpe_max: 5\n",
    )
    .unwrap();

    let config = load_config(temp.path(), None).unwrap();
    assert_eq!(config.workouts_path(), temp.path().join("log.csv"));
    assert_eq!(config.settings.rpe_max, 5.0);
    assert_eq!(config.settings.default_unit, Settings::default().default_unit);
}
