//! Set archive.
//!
//! Every logged set is one row of `workouts.csv`. Rows are only ever
//! appended; the archive never rewrites or deletes them.
//!
//! # Example
//!
//! ```
//! use chrono::Local;
//! use liftlog::archive::{SetArchive, SetInput};
//! use liftlog::catalog::{MovementDraft, MovementStore};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let catalog = MovementStore::new(temp.path().join("movements.csv"));
//! catalog.add(MovementDraft::named("Back Squat"), false).unwrap();
//!
//! let archive = SetArchive::new(temp.path().join("workouts.csv"));
//! let input = SetInput {
//!     movement_id: "back-squat".to_string(),
//!     set_number: "1".to_string(),
//!     reps: Some("5".to_string()),
//!     load: Some("140".to_string()),
//!     ..Default::default()
//! };
//! let set = input.validate(Local::now().naive_local(), 10.0).unwrap();
//! let record = archive.append(&catalog, set).unwrap();
//! assert_eq!(record.volume(), Some(700.0));
//! ```

mod record;
mod store;
mod summary;

pub use record::{
    format_number, generate_workout_id, is_known_set_type, NewSet, Reps, SetInput, SetRecord,
    DEFAULT_SET_TYPE, KNOWN_SET_TYPES, SET_HEADER,
};
pub use store::SetArchive;
pub use summary::{
    export_summary, overwrite_error, summarize, ExportReport, GroupBy, SummaryFilter, MOVEMENT_SUMMARY_HEADER,
    SET_SUMMARY_HEADER, WORKOUT_SUMMARY_HEADER,
};
