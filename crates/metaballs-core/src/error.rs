//! Error types for metaballs-rs.

use thiserror::Error;

/// The main error type for metaballs-rs operations.
///
/// Every variant is a configuration error: field generation and extraction are
/// deterministic, so nothing here is worth retrying.
#[derive(Error, Debug)]
pub enum MetaballError {
    /// Grid resolution is too small to contain a single cube.
    #[error("invalid grid resolution {0}: at least 2 samples per axis are required")]
    InvalidResolution(u32),

    /// A value array whose length is not a perfect cube.
    #[error("field of {0} values is not cubic: length must be N^3")]
    NonCubicField(usize),

    /// Grid half-extent is not a finite positive number.
    #[error("invalid grid half-extent {0}: must be finite and > 0")]
    InvalidExtent(f32),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for metaballs-rs operations.
pub type Result<T> = std::result::Result<T, MetaballError>;
