//! Error types for the wt-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI one error surface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read data table: {path}")]
    TableRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write export file: {path}")]
    ExportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Derivative analysis failed: {0}")]
    Derivative(String),

    #[error("Invalid column selection: column {column} (table has {available} columns)")]
    InvalidColumnSelection { column: usize, available: usize },

    #[error("Curve not found: {0}")]
    CurveNotFound(String),

    #[error("No project loaded")]
    NoProjectLoaded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for wt-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<wt_project::ProjectError> for AppError {
    fn from(err: wt_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<wt_project::ValidationError> for AppError {
    fn from(err: wt_project::ValidationError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<wt_derivative::DerivativeError> for AppError {
    fn from(err: wt_derivative::DerivativeError) -> Self {
        AppError::Derivative(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err.to_string())
    }
}
