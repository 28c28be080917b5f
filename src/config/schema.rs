//! Settings schema.
//!
//! Maps the optional `liftlog.yml` file that lives next to the CSV data.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings read from `liftlog.yml`.
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Movement catalog file (relative to the data directory)
    pub movements_file: PathBuf,

    /// Set archive file (relative to the data directory)
    pub workouts_file: PathBuf,

    /// Unit used when neither the set nor the movement names one
    pub default_unit: String,

    /// Upper bound of the RPE scale
    pub rpe_max: f64,

    /// Default output path for `export-summary`
    pub summary_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            movements_file: PathBuf::from("movements.csv"),
            workouts_file: PathBuf::from("workouts.csv"),
            default_unit: "kg".to_string(),
            rpe_max: 10.0,
            summary_file: PathBuf::from("workouts_summary.csv"),
        }
    }
}
