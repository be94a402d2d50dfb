//! Error types for stepthrough-script

use thiserror::Error;

/// Script loading error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("Invalid process: {0}")]
    Core(#[from] stepthrough_core::Error),

    #[error("Unknown {kind}: {name}")]
    UnknownName { kind: &'static str, name: String },

    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),
}

impl Error {
    /// Unresolved reference to a named definition
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Error::UnknownName {
            kind,
            name: name.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
