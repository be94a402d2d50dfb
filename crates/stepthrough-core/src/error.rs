//! Error types for stepthrough-core

use crate::{ElementId, PlaceId, TransitionId};
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested element is unknown or not currently enabled.
    ///
    /// Returned before anything is mutated.
    #[error("Not fireable: {0}")]
    NotFireable(String),

    #[error("Place not found: {0}")]
    UnknownPlace(PlaceId),

    #[error("Transition not found: {0}")]
    UnknownTransition(TransitionId),

    #[error("Diagram element not found: {0}")]
    UnknownElement(ElementId),

    #[error("No steppable binding for {0}")]
    MissingBinding(TransitionId),

    #[error("Duplicate binding for {0}")]
    DuplicateBinding(TransitionId),

    #[error("Duplicate resource id: {0}")]
    DuplicateResourceId(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Whether this is the ordinary "not fireable" rejection
    pub fn is_not_fireable(&self) -> bool {
        matches!(self, Error::NotFireable(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
