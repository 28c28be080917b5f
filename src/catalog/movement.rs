//! Movement records.

use serde::{Deserialize, Serialize};

use crate::csv_table::{join_list, split_list, Row};

/// Canonical header of `movements.csv`.
pub const MOVEMENT_HEADER: &[&str] = &[
    "id",
    "name",
    "category",
    "default_unit",
    "primary_muscle",
    "secondary_muscles",
    "notes",
];

/// A named exercise in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    /// Slug id, unique within the catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text category (e.g. "push", "hinge").
    #[serde(default)]
    pub category: String,
    /// Unit used when a set does not name one.
    #[serde(default)]
    pub default_unit: String,
    /// Main muscle worked.
    #[serde(default)]
    pub primary_muscle: String,
    /// Other muscles worked, in order.
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

impl Movement {
    /// Create a movement with only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the default unit.
    pub fn with_default_unit(mut self, unit: impl Into<String>) -> Self {
        self.default_unit = unit.into();
        self
    }

    /// Set the primary and secondary muscles.
    pub fn with_muscles(
        mut self,
        primary: impl Into<String>,
        secondary: Vec<impl Into<String>>,
    ) -> Self {
        self.primary_muscle = primary.into();
        self.secondary_muscles = secondary.into_iter().map(Into::into).collect();
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Encode as a CSV row in header order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.category.clone(),
            self.default_unit.clone(),
            self.primary_muscle.clone(),
            join_list(&self.secondary_muscles),
            self.notes.clone(),
        ]
    }

    /// Decode from a header-checked CSV row.
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: row.field(0).trim().to_string(),
            name: row.field(1).trim().to_string(),
            category: row.field(2).to_string(),
            default_unit: row.field(3).to_string(),
            primary_muscle: row.field(4).to_string(),
            secondary_muscles: split_list(row.field(5)),
            notes: row.field(6).to_string(),
        }
    }

    /// Case-insensitive substring match on name or id.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        self.name.to_lowercase().contains(&q) || self.id.to_lowercase().contains(&q)
    }
}
