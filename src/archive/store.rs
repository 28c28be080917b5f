//! Set archive storage (`workouts.csv`).

use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDateTime};

use crate::catalog::MovementStore;
use crate::csv_table::CsvTable;
use crate::error::Result;

use super::record::{NewSet, SetRecord, CREATED_AT_FORMAT, DATE_FORMAT, SET_HEADER, TIME_FORMAT};

/// Append-only storage for logged sets.
#[derive(Debug, Clone)]
pub struct SetArchive {
    table: CsvTable,
    default_unit: String,
}

impl SetArchive {
    /// Create an archive backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: CsvTable::new(path, SET_HEADER),
            default_unit: String::new(),
        }
    }

    /// Unit recorded when neither the set nor its movement names one.
    pub fn with_default_unit(mut self, unit: impl Into<String>) -> Self {
        self.default_unit = unit.into();
        self
    }

    /// Get the archive path.
    pub fn path(&self) -> &Path {
        self.table.path()
    }

    /// Check whether the archive file exists.
    pub fn exists(&self) -> bool {
        self.table.exists()
    }

    /// Verify the header of an existing archive. A missing file passes.
    pub fn check_header(&self) -> Result<()> {
        if self.exists() {
            self.table.check_header()
        } else {
            Ok(())
        }
    }

    /// Create `workouts.csv` with its header if absent.
    pub fn init(&self) -> Result<bool> {
        self.table.init()
    }

    /// Read every set in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` when the archive does not exist.
    pub fn list(&self) -> Result<Vec<SetRecord>> {
        self.table
            .read_rows()?
            .iter()
            .map(SetRecord::from_row)
            .collect()
    }

    /// Read the sets of one workout in insertion order.
    pub fn list_for_workout(&self, workout_id: &str) -> Result<Vec<SetRecord>> {
        let workout_id = workout_id.trim();
        Ok(self
            .list()?
            .into_iter()
            .filter(|s| s.workout_id == workout_id)
            .collect())
    }

    /// Highest set number logged for a movement within a workout.
    pub fn last_set_number(&self, workout_id: &str, movement_id: &str) -> Result<u32> {
        if !self.exists() {
            return Ok(0);
        }
        Ok(self
            .list_for_workout(workout_id)?
            .iter()
            .filter(|s| s.movement_id == movement_id)
            .map(|s| s.set_number)
            .max()
            .unwrap_or(0))
    }

    /// Append a validated set, stamped with the current local time.
    pub fn append(&self, catalog: &MovementStore, set: NewSet) -> Result<SetRecord> {
        self.append_at(catalog, set, Local::now().naive_local())
    }

    /// Append a validated set with `now` as its creation time.
    ///
    /// The movement must exist in `catalog`; otherwise `MovementNotFound` is
    /// returned and nothing is written. `created_at` is kept strictly
    /// increasing across the archive even if the clock stalls or steps back.
    pub fn append_at(
        &self,
        catalog: &MovementStore,
        set: NewSet,
        now: NaiveDateTime,
    ) -> Result<SetRecord> {
        let movement = catalog.resolve(&set.movement_id)?;

        let existing = if self.exists() {
            self.list()?
        } else {
            Vec::new()
        };
        let created_at = match existing.last().and_then(SetRecord::created_at_time) {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };

        let unit = set
            .unit
            .or_else(|| Some(movement.default_unit.clone()).filter(|u| !u.is_empty()))
            .unwrap_or_else(|| self.default_unit.clone());

        let record = SetRecord {
            workout_id: set.workout_id,
            date: set.date.format(DATE_FORMAT).to_string(),
            start_time: set.start_time.format(TIME_FORMAT).to_string(),
            movement_id: movement.id,
            movement_name: movement.name,
            set_number: set.set_number,
            set_type: set.set_type,
            cluster_id: set.cluster_id,
            reps: set.reps,
            load: set.load,
            unit,
            rest_seconds: set.rest_seconds,
            rpe: set.rpe,
            tags: set.tags,
            notes: set.notes,
            created_at: created_at.format(CREATED_AT_FORMAT).to_string(),
        };

        self.table.append(&[record.to_row()])?;
        tracing::info!(
            "Logged set {} of {} in workout {}",
            record.set_number,
            record.movement_id,
            record.workout_id
        );
        Ok(record)
    }
}
