//! Error types for the assembly model
//!
//! Loading and structural checks of an assembly report through this type.
//! Emitters define their own error taxonomy on top of it.

use thiserror::Error;

/// Result type alias for assembly operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for assembly operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid assembly: {0}")]
    InvalidAssembly(String),
}
