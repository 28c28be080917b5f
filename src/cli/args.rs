//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.
//!
//! Multi-word flags use underscores (`--movement_id`) with kebab-case
//! aliases (`--movement-id`). Numeric set fields are taken as text and
//! validated together, so one bad value does not hide another.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::archive::GroupBy;

/// liftlog - log workouts and keep a movement catalog in plain CSV.
#[derive(Debug, Parser)]
#[command(name = "liftlog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding movements.csv and workouts.csv
    #[arg(long = "data_dir", visible_alias = "data-dir", global = true, env = "LIFTLOG_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to settings file (default: <data-dir>/liftlog.yml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Read prompt answers line by line from stdin
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create movements.csv and workouts.csv with their headers
    Init(InitArgs),

    /// List the movement catalog
    ListMovements(ListMovementsArgs),

    /// Find movements by name or id
    FindMovement(FindMovementArgs),

    /// Add a movement to the catalog
    AddMovement(AddMovementArgs),

    /// Bulk-load movements from a CSV or TSV file
    ImportMovements(ImportMovementsArgs),

    /// Log one set
    AddSet(AddSetArgs),

    /// List logged sets
    ListSets(ListSetsArgs),

    /// Log sets interactively
    StartSession(StartSessionArgs),

    /// Write a summary CSV of logged sets
    ExportSummary(ExportSummaryArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InitArgs {
    /// Fail if either data file already exists
    #[arg(long = "fail-if-exists", alias = "fail_if_exists")]
    pub fail_if_exists: bool,
}

/// Arguments for the `list-movements` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListMovementsArgs {
    /// Only movements in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `find-movement` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FindMovementArgs {
    /// Text to look for in names and ids
    #[arg(short, long)]
    pub name: String,

    /// Only movements in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `add-movement` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddMovementArgs {
    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Explicit id (default: derived from the name)
    #[arg(long)]
    pub id: Option<String>,

    /// Free-text category, e.g. push, pull, hinge
    #[arg(long)]
    pub category: Option<String>,

    /// Default unit, e.g. kg, lb, sec
    #[arg(long, visible_alias = "default_unit", alias = "default-unit")]
    pub unit: Option<String>,

    /// Main muscle worked
    #[arg(long = "primary_muscle", visible_alias = "primary-muscle")]
    pub primary_muscle: Option<String>,

    /// Other muscles worked, comma-separated
    #[arg(long = "secondary_muscles", visible_alias = "secondary-muscles")]
    pub secondary_muscles: Option<String>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Replace an existing movement with the same id
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the `import-movements` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ImportMovementsArgs {
    /// File to import (comma- or tab-separated)
    #[arg(long, visible_alias = "file")]
    pub path: PathBuf,
}

/// Arguments for the `add-set` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddSetArgs {
    /// Movement id from the catalog
    #[arg(long = "movement_id", visible_alias = "movement-id")]
    pub movement_id: Option<String>,

    /// Movement name, matched exactly (ignoring case)
    #[arg(long = "movement_name", visible_alias = "movement-name")]
    pub movement_name: Option<String>,

    /// Add the movement named by --movement_name if it is missing
    #[arg(long = "create-missing", alias = "create_missing")]
    pub create_missing: bool,

    /// Workout id (default: a new random id)
    #[arg(long = "workout_id", visible_alias = "workout-id")]
    pub workout_id: Option<String>,

    /// Date as YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Start time as HH:MM or HH:MM:SS (default: now)
    #[arg(long = "start_time", visible_alias = "start-time")]
    pub start_time: Option<String>,

    /// Set number within the workout and movement, starting at 1
    #[arg(long = "set_number", visible_alias = "set-number", allow_negative_numbers = true)]
    pub set_number: String,

    /// Set type, e.g. warmup, work, drop
    #[arg(long = "set_type", visible_alias = "set-type")]
    pub set_type: Option<String>,

    /// Cluster id shared by sets done as a superset
    #[arg(long = "cluster_id", visible_alias = "cluster-id")]
    pub cluster_id: Option<String>,

    /// Reps performed, or AMRAP
    #[arg(long, allow_negative_numbers = true)]
    pub reps: Option<String>,

    /// Load lifted
    #[arg(long, allow_negative_numbers = true)]
    pub load: Option<String>,

    /// Unit of the load (default: the movement's unit)
    #[arg(long)]
    pub unit: Option<String>,

    /// Rest before the next set, in seconds
    #[arg(long = "rest_seconds", visible_alias = "rest-seconds", allow_negative_numbers = true)]
    pub rest_seconds: Option<String>,

    /// Rate of perceived exertion
    #[arg(long, allow_negative_numbers = true)]
    pub rpe: Option<String>,

    /// Tags, comma-separated
    #[arg(long)]
    pub tags: Option<String>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for the `list-sets` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListSetsArgs {
    /// Only sets of this workout
    #[arg(long = "workout_id", visible_alias = "workout-id")]
    pub workout_id: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `start-session` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StartSessionArgs {
    /// Continue an existing workout
    #[arg(long = "workout_id", visible_alias = "workout-id")]
    pub workout_id: Option<String>,

    /// Date recorded on the sets (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

/// Arguments for the `export-summary` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExportSummaryArgs {
    /// Output file (default: summary_file in the data directory)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// One row per set, workout or movement
    #[arg(long = "group-by", alias = "group_by", default_value = "set", value_name = "set|workout|movement")]
    pub group_by: GroupBy,

    /// Only sets of this workout
    #[arg(long = "workout_id", visible_alias = "workout-id")]
    pub workout_id: Option<String>,

    /// Only sets of this movement
    #[arg(long = "movement_id", visible_alias = "movement-id")]
    pub movement_id: Option<String>,

    /// Earliest date to include
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<NaiveDate>,

    /// Latest date to include
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: Option<NaiveDate>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
