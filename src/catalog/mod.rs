//! Movement catalog.
//!
//! The catalog lives in `movements.csv`, one row per movement keyed by a
//! slug id derived from the movement's name.
//!
//! # Example
//!
//! ```
//! use liftlog::catalog::{MovementDraft, MovementStore};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let store = MovementStore::new(temp.path().join("movements.csv"));
//! store.init().unwrap();
//!
//! let added = store.add(MovementDraft::named("Barbell Bench Press"), false).unwrap();
//! assert_eq!(added.movement.id, "barbell-bench-press");
//! assert_eq!(store.find("bench", None).unwrap().len(), 1);
//! ```

mod import;
mod movement;
mod slug;
mod store;

pub use import::{import_movements, ImportReport, ImportRowError};
pub use movement::{Movement, MOVEMENT_HEADER};
pub use slug::{is_slug, slugify, MAX_SLUG_LEN};
pub use store::{AddOutcome, MovementDraft, MovementStore};
