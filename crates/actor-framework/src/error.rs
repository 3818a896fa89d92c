//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, as opposed to the domain errors an
//! entity returns from its hooks (those travel inside [`FrameworkError::EntityError`]).

use crate::storage::StorageError;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl FrameworkError {
    /// Wraps a domain error returned by an entity hook.
    pub fn entity<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Self::EntityError(Box::new(error))
    }
}
