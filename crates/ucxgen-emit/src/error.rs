//! Emitter error types.

/// Errors that can occur while generating artifacts.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// Two vendor functions reduce to the same wrapper name.
    #[error("wrapper name collision: '{wrapper}' generated for both {first} and {second}")]
    WrapperNameCollision {
        wrapper: String,
        first: String,
        second: String,
    },

    /// Parse error while building the model.
    #[error("parse error: {0}")]
    Parse(#[from] ucxgen_parse::ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for emit operations.
pub type Result<T> = std::result::Result<T, EmitError>;
