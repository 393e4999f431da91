//! Parse error types.

use std::path::PathBuf;

/// Errors that can occur while building the API model from headers.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The header directory does not exist. Fatal for the whole run.
    #[error("header directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The same fully qualified function name was declared twice.
    #[error("duplicate function '{name}': declared in {first} and again in {second}")]
    DuplicateFunction {
        name: String,
        first: String,
        second: String,
    },

    /// A naming convention produced an unusable matching pattern.
    #[error("invalid prototype pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;
