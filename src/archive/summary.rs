//! Summary export.
//!
//! Rows of the archive are filtered, grouped and written to a derived CSV.
//! The grouping decides the output schema:
//!
//! | group-by   | one row per                 |
//! |------------|-----------------------------|
//! | `set`      | logged set, plus `volume`   |
//! | `workout`  | workout id                  |
//! | `movement` | movement id and unit        |

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::csv_table::{encode_rows, same_file, write_atomically};
use crate::error::{LiftlogError, Result};

use super::record::{format_number, SetRecord};
use super::store::SetArchive;

/// Header of a per-set export.
pub const SET_SUMMARY_HEADER: &[&str] = &[
    "workout_id",
    "date",
    "movement_id",
    "movement_name",
    "set_number",
    "set_type",
    "cluster_id",
    "reps",
    "load",
    "unit",
    "rpe",
    "volume",
];

/// Header of a per-workout export.
pub const WORKOUT_SUMMARY_HEADER: &[&str] =
    &["workout_id", "date", "sets", "total_reps", "movements_summary"];

/// Header of a per-movement export.
pub const MOVEMENT_SUMMARY_HEADER: &[&str] = &[
    "movement_id",
    "movement_name",
    "unit",
    "sets",
    "total_reps",
    "total_volume",
    "best_load",
];

/// How exported rows are grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupBy {
    #[default]
    Set,
    Workout,
    Movement,
}

impl GroupBy {
    /// Header written for this grouping.
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            Self::Set => SET_SUMMARY_HEADER,
            Self::Workout => WORKOUT_SUMMARY_HEADER,
            Self::Movement => MOVEMENT_SUMMARY_HEADER,
        }
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "set" | "sets" => Ok(Self::Set),
            "workout" | "workouts" => Ok(Self::Workout),
            "movement" | "movements" => Ok(Self::Movement),
            other => Err(format!(
                "unknown grouping '{}' (expected set, workout or movement)",
                other
            )),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Set => "set",
            Self::Workout => "workout",
            Self::Movement => "movement",
        };
        write!(f, "{}", name)
    }
}

/// Row filters applied before grouping.
#[derive(Debug, Clone, Default)]
pub struct SummaryFilter {
    pub workout_id: Option<String>,
    pub movement_id: Option<String>,
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
}

impl SummaryFilter {
    /// Check the bounds are in order.
    pub fn validate(&self) -> Result<()> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from > to => Err(LiftlogError::invalid(
                "from",
                format!("{} is after --to {}", from, to),
            )),
            _ => Ok(()),
        }
    }

    /// Whether a set passes every filter.
    pub fn matches(&self, set: &SetRecord) -> bool {
        if let Some(id) = &self.workout_id {
            if set.workout_id != *id {
                return false;
            }
        }
        if let Some(id) = &self.movement_id {
            if set.movement_id != *id {
                return false;
            }
        }
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        match set.date_value() {
            Some(date) => {
                self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
            }
            None => false,
        }
    }
}

/// Result of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Data rows written, header excluded.
    pub rows: usize,
    /// Sets that passed the filters.
    pub sets: usize,
}

/// Export a summary of `archive` to `out`.
///
/// An empty archive (or one where nothing passes the filters) produces a
/// header-only file.
pub fn export_summary(
    archive: &SetArchive,
    out: &Path,
    group_by: GroupBy,
    filter: &SummaryFilter,
) -> Result<ExportReport> {
    filter.validate()?;
    if same_file(out, archive.path()) {
        return Err(overwrite_error(out));
    }

    let sets: Vec<SetRecord> = archive
        .list()?
        .into_iter()
        .filter(|s| filter.matches(s))
        .collect();
    let rows = summarize(&sets, group_by);

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(LiftlogError::FileNotFound {
                path: parent.to_path_buf(),
            });
        }
    }
    write_atomically(out, &encode_rows(Some(group_by.header()), &rows)?)?;

    tracing::info!(
        "Exported {} rows ({} sets, grouped by {}) to {:?}",
        rows.len(),
        sets.len(),
        group_by,
        out
    );
    Ok(ExportReport {
        rows: rows.len(),
        sets: sets.len(),
    })
}

/// Error for an export target that is one of the data files.
pub fn overwrite_error(out: &Path) -> LiftlogError {
    LiftlogError::invalid(
        "out",
        format!("{} would overwrite a data file", out.display()),
    )
}

/// Build summary rows from already-filtered sets.
pub fn summarize(sets: &[SetRecord], group_by: GroupBy) -> Vec<Vec<String>> {
    match group_by {
        GroupBy::Set => sets.iter().map(set_row).collect(),
        GroupBy::Workout => by_workout(sets),
        GroupBy::Movement => by_movement(sets),
    }
}

fn opt_number(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

fn set_row(set: &SetRecord) -> Vec<String> {
    vec![
        set.workout_id.clone(),
        set.date.clone(),
        set.movement_id.clone(),
        set.movement_name.clone(),
        set.set_number.to_string(),
        set.set_type.clone(),
        set.cluster_id.clone(),
        set.reps.map(|r| r.to_string()).unwrap_or_default(),
        opt_number(set.load),
        set.unit.clone(),
        opt_number(set.rpe),
        opt_number(set.volume()),
    ]
}

#[derive(Debug)]
struct WorkoutTotals<'a> {
    workout_id: &'a str,
    date: &'a str,
    sets: usize,
    total_reps: u64,
    entries: Vec<String>,
}

fn by_workout(sets: &[SetRecord]) -> Vec<Vec<String>> {
    let mut groups: Vec<WorkoutTotals> = Vec::new();
    for set in sets {
        let idx = match groups.iter().position(|g| g.workout_id == set.workout_id) {
            Some(idx) => idx,
            None => {
                groups.push(WorkoutTotals {
                    workout_id: &set.workout_id,
                    date: &set.date,
                    sets: 0,
                    total_reps: 0,
                    entries: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        group.sets += 1;
        group.total_reps += set.reps.and_then(|r| r.count()).map_or(0, u64::from);
        group.entries.push(format!(
            "{}:{}x{}@{}",
            set.movement_name,
            set.set_number,
            set.reps.map(|r| r.to_string()).unwrap_or_default(),
            opt_number(set.load)
        ));
    }

    groups
        .into_iter()
        .map(|g| {
            vec![
                g.workout_id.to_string(),
                g.date.to_string(),
                g.sets.to_string(),
                g.total_reps.to_string(),
                g.entries.join(";"),
            ]
        })
        .collect()
}

#[derive(Debug)]
struct MovementTotals<'a> {
    movement_id: &'a str,
    movement_name: &'a str,
    unit: &'a str,
    sets: usize,
    total_reps: u64,
    total_volume: f64,
    best_load: Option<f64>,
}

fn by_movement(sets: &[SetRecord]) -> Vec<Vec<String>> {
    let mut groups: Vec<MovementTotals> = Vec::new();
    for set in sets {
        let idx = match groups
            .iter()
            .position(|g| g.movement_id == set.movement_id && g.unit == set.unit)
        {
            Some(idx) => idx,
            None => {
                groups.push(MovementTotals {
                    movement_id: &set.movement_id,
                    movement_name: &set.movement_name,
                    unit: &set.unit,
                    sets: 0,
                    total_reps: 0,
                    total_volume: 0.0,
                    best_load: None,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        group.sets += 1;
        group.total_reps += set.reps.and_then(|r| r.count()).map_or(0, u64::from);
        group.total_volume += set.volume().unwrap_or(0.0);
        if let Some(load) = set.load {
            group.best_load = Some(group.best_load.map_or(load, |best| best.max(load)));
        }
    }

    groups
        .into_iter()
        .map(|g| {
            vec![
                g.movement_id.to_string(),
                g.movement_name.to_string(),
                g.unit.to_string(),
                g.sets.to_string(),
                g.total_reps.to_string(),
                format_number(g.total_volume),
                opt_number(g.best_load),
            ]
        })
        .collect()
}
