//! Error types for geoglobe.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for geoglobe operations.
#[derive(Error, Debug)]
pub enum GlobeError {
    /// An actor with the given name is already part of the scene.
    #[error("actor '{0}' already exists")]
    ActorExists(String),

    /// An actor with the given name was not found.
    #[error("actor '{0}' not found")]
    ActorNotFound(String),

    /// A table does not have the requested column.
    #[error("table '{table}' has no column {column}")]
    MissingColumn { table: String, column: String },

    /// The named color scheme is not built in.
    #[error("unknown color scheme '{0}'")]
    UnknownColorScheme(String),

    /// An input file could not be found.
    #[error("input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Image decoding error (globe texture).
    #[error("image error: {0}")]
    Image(String),

    /// Rendering error.
    #[error("render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited text parse error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Shapefile read error.
    #[error("shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for geoglobe operations.
pub type Result<T> = std::result::Result<T, GlobeError>;
