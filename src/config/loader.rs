//! Settings discovery and loading.
//!
//! liftlog keeps its data in a single directory. The settings file is looked
//! up as `<data-dir>/liftlog.yml` unless an explicit path is given.

use crate::config::schema::Settings;
use crate::error::{LiftlogError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Default settings file name inside the data directory.
pub const SETTINGS_FILE: &str = "liftlog.yml";

/// Resolved configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the CSV files.
    pub data_dir: PathBuf,

    /// Parsed settings (defaults when no file exists).
    pub settings: Settings,
}

impl Config {
    /// Build a config from a data directory and settings.
    pub fn new(data_dir: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            data_dir: data_dir.into(),
            settings,
        }
    }

    /// Path of the movement catalog.
    pub fn movements_path(&self) -> PathBuf {
        self.data_dir.join(&self.settings.movements_file)
    }

    /// Path of the set archive.
    pub fn workouts_path(&self) -> PathBuf {
        self.data_dir.join(&self.settings.workouts_file)
    }

    /// Default output path of `export-summary`.
    pub fn summary_path(&self) -> PathBuf {
        self.data_dir.join(&self.settings.summary_file)
    }
}

/// Parse YAML content into Settings.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings =
        serde_yaml::from_str(content).map_err(|e| LiftlogError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    if settings.rpe_max.is_nan() || settings.rpe_max <= 0.0 {
        return Err(LiftlogError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: format!("rpe_max must be positive, got {}", settings.rpe_max),
        });
    }
    if settings.default_unit.trim().is_empty() {
        return Err(LiftlogError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: "default_unit must not be empty".to_string(),
        });
    }

    let files = [
        ("movements_file", &settings.movements_file),
        ("workouts_file", &settings.workouts_file),
        ("summary_file", &settings.summary_file),
    ];
    for (i, (name, path)) in files.iter().enumerate() {
        if let Some((other, _)) = files[..i]
            .iter()
            .find(|(_, earlier)| same_relative_path(earlier, path))
        {
            return Err(LiftlogError::ConfigParseError {
                path: source_path.to_path_buf(),
                message: format!("{} and {} must name different files", other, name),
            });
        }
    }

    Ok(settings)
}

fn same_relative_path(a: &Path, b: &Path) -> bool {
    let parts = |p: &Path| {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .map(|c| c.as_os_str().to_os_string())
            .collect::<Vec<_>>()
    };
    parts(a) == parts(b)
}

/// Load a settings file.
///
/// # Errors
///
/// Returns `FileNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| LiftlogError::file(path, e))?;
    parse_settings(&content, path)
}

/// Load config with optional path override.
///
/// If `config_override` is provided the file must exist. Otherwise
/// `<data_dir>/liftlog.yml` is used when present, and defaults when not.
pub fn load_config(data_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    let settings = match config_override {
        Some(path) => {
            tracing::debug!("Loading settings from {:?}", path);
            load_settings_file(path)?
        }
        None => {
            let path = data_dir.join(SETTINGS_FILE);
            if path.exists() {
                tracing::debug!("Loading settings from {:?}", path);
                load_settings_file(&path)?
            } else {
                Settings::default()
            }
        }
    };

    Ok(Config::new(data_dir, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_settings_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.movements_path(), temp.path().join("movements.csv"));
        assert_eq!(config.workouts_path(), temp.path().join("workouts.csv"));
    }

    #[test]
    fn settings_file_in_data_dir_is_loaded() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILE),
            "workouts_file: log.csv\ndefault_unit: lb\n",
        )
        .unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.workouts_path(), temp.path().join("log.csv"));
        assert_eq!(config.settings.default_unit, "lb");
    }

    #[test]
    fn explicit_override_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let err = load_config(temp.path(), Some(&missing)).unwrap_err();
        assert!(matches!(err, LiftlogError::FileNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let err = parse_settings("rpe_max: [", Path::new("liftlog.yml")).unwrap_err();
        assert!(matches!(err, LiftlogError::ConfigParseError { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn non_positive_rpe_max_is_rejected() {
        let err = parse_settings("rpe_max: 0", Path::new("liftlog.yml")).unwrap_err();
        assert!(err.to_string().contains("rpe_max"));
    }

    #[test]
    fn summary_file_cannot_be_a_data_file() {
        let err = parse_settings(
            "workouts_file: log.csv\nsummary_file: ./log.csv\n",
            Path::new("liftlog.yml"),
        )
        .unwrap_err();
        assert!(matches!(err, LiftlogError::ConfigParseError { .. }));
        assert!(err
            .to_string()
            .contains("workouts_file and summary_file must name different files"));

        let err = parse_settings("movements_file: workouts.csv\n", Path::new("liftlog.yml"))
            .unwrap_err();
        assert!(err.to_string().contains("movements_file and workouts_file"));
    }

    #[test]
    fn empty_file_is_default() {
        let settings = parse_settings("   \n", Path::new("liftlog.yml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn summary_path_is_inside_data_dir() {
        let config = Config::new("/data", Settings::default());
        assert_eq!(
            config.summary_path(),
            PathBuf::from("/data/workouts_summary.csv")
        );
    }
}
