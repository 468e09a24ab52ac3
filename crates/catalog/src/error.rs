//! Error types for the catalog crate.
//!
//! Loading a catalog file and persisting watch history are the only
//! fallible operations in the workspace that touch the filesystem, so
//! every I/O and decoding failure funnels through [`CatalogError`].

use thiserror::Error;

/// Errors that can occur while loading catalog data or saving watch history
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file contents were not valid JSON for the expected shape
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A record carried a value outside its allowed range
    #[error("Invalid value for {field} on movie {movie_id}: {value}")]
    InvalidValue {
        movie_id: u32,
        field: String,
        value: String,
    },

    /// Watch history could not be serialized back to disk
    #[error("Failed to save watch history to {path}: {reason}")]
    SaveError { path: String, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
