//! Movement catalog storage (`movements.csv`).

use std::path::{Path, PathBuf};

use crate::csv_table::CsvTable;
use crate::error::{LiftlogError, Result};

use super::movement::{Movement, MOVEMENT_HEADER};
use super::slug::{is_slug, slugify};

/// User-supplied fields for a new movement.
#[derive(Debug, Clone, Default)]
pub struct MovementDraft {
    /// Explicit id; derived from the name when absent.
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub default_unit: String,
    pub primary_muscle: String,
    pub secondary_muscles: Vec<String>,
    pub notes: String,
}

impl MovementDraft {
    /// Create a draft with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Validate the draft and derive its id.
    pub fn into_movement(self) -> Result<Movement> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(LiftlogError::invalid("name", "must not be empty"));
        }

        let id = match self.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(explicit) if is_slug(explicit) => explicit.to_string(),
            Some(explicit) => {
                return Err(LiftlogError::invalid(
                    "id",
                    format!(
                        "'{}' is not a valid id (try '{}')",
                        explicit,
                        slugify(explicit)
                    ),
                ))
            }
            None => slugify(&name),
        };
        if id.is_empty() {
            return Err(LiftlogError::invalid(
                "name",
                format!("'{}' has no letters or digits to build an id from", name),
            ));
        }

        Ok(Movement {
            id,
            name,
            category: self.category.trim().to_string(),
            default_unit: self.default_unit.trim().to_string(),
            primary_muscle: self.primary_muscle.trim().to_string(),
            secondary_muscles: self.secondary_muscles,
            notes: self.notes,
        })
    }
}

/// What `add` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// The stored movement.
    pub movement: Movement,
    /// Whether an existing movement with the same id was replaced.
    pub replaced: bool,
}

/// Storage for the movement catalog.
#[derive(Debug, Clone)]
pub struct MovementStore {
    table: CsvTable,
}

impl MovementStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            table: CsvTable::new(path, MOVEMENT_HEADER),
        }
    }

    /// Get the catalog path.
    pub fn path(&self) -> &Path {
        self.table.path()
    }

    /// Check whether the catalog file exists.
    pub fn exists(&self) -> bool {
        self.table.exists()
    }

    /// Create `movements.csv` with its header if absent.
    ///
    /// Returns `true` when the file was created.
    pub fn init(&self) -> Result<bool> {
        self.table.init()
    }

    /// List every movement in file order.
    ///
    /// Rows with an empty id get one derived from their name.
    pub fn list(&self) -> Result<Vec<Movement>> {
        let rows = self.table.read_rows()?;
        Ok(rows
            .iter()
            .map(|row| {
                let mut movement = Movement::from_row(row);
                if movement.id.is_empty() {
                    movement.id = slugify(&movement.name);
                }
                movement
            })
            .filter(|m| !m.id.is_empty())
            .collect())
    }

    /// List movements, treating a missing file as an empty catalog.
    pub fn list_or_empty(&self) -> Result<Vec<Movement>> {
        if self.exists() {
            self.list()
        } else {
            Ok(Vec::new())
        }
    }

    /// Find movements whose name or id contains `query`.
    ///
    /// When `category` is given, only movements in that category (compared
    /// case-insensitively) are returned.
    pub fn find(&self, query: &str, category: Option<&str>) -> Result<Vec<Movement>> {
        let matches: Vec<Movement> = self
            .list()?
            .into_iter()
            .filter(|m| m.matches(query))
            .filter(|m| category.map_or(true, |c| m.category.eq_ignore_ascii_case(c.trim())))
            .collect();
        tracing::debug!("find({:?}) matched {} movements", query, matches.len());
        Ok(matches)
    }

    /// Look up a movement by exact id.
    pub fn resolve(&self, id: &str) -> Result<Movement> {
        let id = id.trim();
        self.list()?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| LiftlogError::MovementNotFound { id: id.to_string() })
    }

    /// Look up a movement by exact name, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Movement>> {
        let name = name.trim().to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .find(|m| m.name.to_lowercase() == name))
    }

    /// Add a movement.
    ///
    /// Creates the catalog if needed. An id collision is a
    /// `DuplicateMovement` error unless `overwrite` is set, in which case the
    /// existing row is replaced in place.
    pub fn add(&self, draft: MovementDraft, overwrite: bool) -> Result<AddOutcome> {
        let movement = draft.into_movement()?;
        let mut existing = self.list_or_empty()?;

        match existing.iter().position(|m| m.id == movement.id) {
            Some(_) if !overwrite => Err(LiftlogError::DuplicateMovement {
                id: movement.id.clone(),
            }),
            Some(idx) => {
                existing[idx] = movement.clone();
                let rows: Vec<Vec<String>> = existing.iter().map(Movement::to_row).collect();
                self.table.rewrite(&rows)?;
                tracing::info!("Replaced movement {}", movement.id);
                Ok(AddOutcome {
                    movement,
                    replaced: true,
                })
            }
            None => {
                self.table.append(&[movement.to_row()])?;
                tracing::info!("Added movement {}", movement.id);
                Ok(AddOutcome {
                    movement,
                    replaced: false,
                })
            }
        }
    }

    /// Append already-validated movements in one write.
    pub(crate) fn append_all(&self, movements: &[Movement]) -> Result<()> {
        let rows: Vec<Vec<String>> = movements.iter().map(Movement::to_row).collect();
        self.table.append(&rows)
    }
}
