//! Error types for augur library.
//!
//! Normalizing a response string never fails; these errors only come from
//! the I/O entry points, rendering, and custom configuration.

use std::io;
use thiserror::Error;

/// Result type alias for augur operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around the normalization pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading a response from a file or reader.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization of a document failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document was built from prose and carries no source field keys.
    #[error("Document has no structured source fields")]
    NotStructured,

    /// A custom keyword rule pattern did not compile.
    #[error("Invalid keyword pattern: {0}")]
    Pattern(#[from] regex::Error),
}
