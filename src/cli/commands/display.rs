//! Shared display helpers for listings.
//!
//! Used by `list-movements`, `find-movement` and `list-sets` so movements
//! and sets render the same way everywhere.

use serde::Serialize;

use crate::archive::{format_number, SetRecord};
use crate::catalog::Movement;
use crate::csv_table::join_list;
use crate::error::{LiftlogError, Result};
use crate::ui::{Table, UserInterface};

/// Build the table shown for a list of movements.
pub fn movement_table(movements: &[Movement]) -> Table {
    let mut table = Table::new(&["id", "name", "category", "unit", "muscles"]);
    for m in movements {
        let mut muscles = vec![m.primary_muscle.clone()];
        muscles.extend(m.secondary_muscles.iter().cloned());
        muscles.retain(|s| !s.is_empty());
        table.add_row(vec![
            m.id.clone(),
            m.name.clone(),
            m.category.clone(),
            m.default_unit.clone(),
            join_list(&muscles),
        ]);
    }
    table
}

/// Build the table shown for a list of sets.
pub fn set_table(sets: &[SetRecord]) -> Table {
    let mut table = Table::new(&[
        "workout", "date", "movement", "set", "type", "reps", "load", "rpe",
    ]);
    for s in sets {
        let load = match s.load {
            Some(load) if s.unit.is_empty() => format_number(load),
            Some(load) => format!("{} {}", format_number(load), s.unit),
            None => String::new(),
        };
        table.add_row(vec![
            s.workout_id.clone(),
            s.date.clone(),
            s.movement_name.clone(),
            s.set_number.to_string(),
            s.set_type.clone(),
            s.reps.map(|r| r.to_string()).unwrap_or_default(),
            load,
            s.rpe.map(format_number).unwrap_or_default(),
        ]);
    }
    table
}

/// Print `value` as pretty JSON.
pub fn show_json<T: Serialize + ?Sized>(ui: &mut dyn UserInterface, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| LiftlogError::Other(e.into()))?;
    ui.message(&json);
    Ok(())
}
