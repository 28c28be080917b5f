//! Error types for liftlog operations.
//!
//! This module defines [`LiftlogError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `LiftlogError` for domain errors that need distinct handling
//! - Use `anyhow::Error` (via `LiftlogError::Other`) for unexpected errors
//! - Every error maps to a process exit code via [`LiftlogError::exit_code`]

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for user and input errors.
pub const EXIT_USER_ERROR: i32 = 1;

/// Exit code for missing, unreadable or malformed files.
pub const EXIT_FILE_ERROR: i32 = 2;

/// A single invalid field reported by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as it appears in the CSV header.
    pub field: String,
    /// What is wrong with the value.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Core error type for liftlog operations.
#[derive(Debug, Error)]
pub enum LiftlogError {
    /// Referenced movement id is not in the catalog.
    #[error("Unknown movement: {id}")]
    MovementNotFound { id: String },

    /// A movement with the same id already exists.
    #[error("Movement '{id}' already exists (use --overwrite to replace it)")]
    DuplicateMovement { id: String },

    /// One or more field values failed validation.
    #[error("Invalid input: {}", join_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    /// A required data file does not exist.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A data file could not be read or written.
    #[error("Cannot access {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV file does not follow the expected schema.
    #[error("Malformed CSV in {path}: {message}")]
    MalformedCsv { path: PathBuf, message: String },

    /// A file exists and the caller asked not to overwrite it.
    #[error("Already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// The input stream ended while a prompt was waiting.
    #[error("Input closed")]
    InputClosed,

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LiftlogError {
    /// Build a validation error for a single field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Wrap an IO error with the path it happened on.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::File { path, source }
        }
    }

    /// Suggested next step to print after the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::FileNotFound { .. } => {
                Some("Run `liftlog init` to create the data files, or check --data-dir")
            }
            Self::MovementNotFound { .. } => {
                Some("Use `liftlog find-movement --name <query>` to look up movement ids")
            }
            Self::MalformedCsv { .. } => Some("Fix the file by hand or move it aside"),
            _ => None,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MovementNotFound { .. }
            | Self::DuplicateMovement { .. }
            | Self::Validation { .. }
            | Self::AlreadyExists { .. }
            | Self::ConfigParseError { .. }
            | Self::InputClosed
            | Self::Other(_) => EXIT_USER_ERROR,
            Self::FileNotFound { .. }
            | Self::File { .. }
            | Self::MalformedCsv { .. }
            | Self::Io(_)
            | Self::Csv(_) => EXIT_FILE_ERROR,
        }
    }
}

/// Result type alias for liftlog operations.
pub type Result<T> = std::result::Result<T, LiftlogError>;
