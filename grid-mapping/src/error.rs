//! Error types for grid_mapping.
//!
//! The grid engine itself reports no errors: out-of-range access is a
//! caller bug. Errors here cover rehydrating grids from snapshots, loading
//! configuration and the file I/O around them.

use thiserror::Error;

use crate::config::ConfigLoadError;

/// grid_mapping error type
#[derive(Error, Debug)]
pub enum GridError {
    /// Snapshot cell count does not fit its width and height.
    #[error("snapshot has {actual} cells, expected {expected}")]
    SnapshotSize {
        /// Cell count the geometry calls for
        expected: usize,
        /// Cell count found
        actual: usize,
    },

    /// Non-positive resolution or an empty grid.
    #[error("invalid grid geometry: {0}")]
    InvalidGeometry(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot or session JSON could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigLoadError),
}

/// Result alias for fallible grid_mapping operations.
pub type Result<T> = std::result::Result<T, GridError>;
