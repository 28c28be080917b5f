//! Configuration loading for liftlog.
//!
//! - Settings schema in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use liftlog::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("liftlog.yml"), "default_unit: lb").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.settings.default_unit, "lb");
//! assert!(config.movements_path().ends_with("movements.csv"));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_settings_file, parse_settings, Config, SETTINGS_FILE};
pub use schema::Settings;
