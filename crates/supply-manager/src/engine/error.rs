//! Errors raised by product operations.

use super::validation::ValidationError;
use crate::config::ConfigError;
use crate::model::ProductId;
use thiserror::Error;

/// Errors that can occur during product operations.
///
/// Engine failures (`Validation`, `InvalidQuantity`, `InsufficientStock`) leave the
/// stored record untouched, as does every other variant.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// A product with this id is already tracked.
    #[error("Product already exists: {0}")]
    AlreadyExists(ProductId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Stock quantities passed to a command must be at least 1.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u64, available: u32 },

    /// The runtime configuration cannot be used.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Durable storage rejected a write or could not be read.
    #[error("Product storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunication(msg)
    }
}
