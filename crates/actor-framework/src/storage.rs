//! # Durable Storage
//!
//! [`EntityStorage`] is the seam between a [`ResourceActor`](crate::ResourceActor) and
//! wherever its records live between process runs. The actor is the only caller, and it
//! calls sequentially, so implementations never see two writes for the same store at
//! once.
//!
//! The contract the actor relies on:
//!
//! - `load_all` is called once, before the first request is served.
//! - `save` / `remove` either persist the change or return an error *and leave the
//!   durable state as it was*. The actor does not commit a change in memory until the
//!   storage call succeeded.
//! - `flush` is called once when the actor shuts down.

use crate::entity::ActorEntity;
use async_trait::async_trait;
use std::collections::HashMap;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Codec error: {0}")]
    Codec(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("Corrupt store: {0}")]
    Corrupt(String),
}

impl StorageError {
    pub fn codec<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Self::Codec(Box::new(error))
    }

    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }
}

/// Persistence backend for the records owned by one `ResourceActor`.
#[async_trait]
pub trait EntityStorage<T: ActorEntity>: Send + Sync {
    /// Reads every persisted record.
    async fn load_all(&mut self) -> Result<Vec<T>, StorageError>;

    /// Inserts or replaces the record stored under `entity.id()`.
    async fn save(&mut self, entity: &T) -> Result<(), StorageError>;

    /// Removes the record stored under `id`. Removing an absent id is not an error.
    async fn remove(&mut self, id: &T::Id) -> Result<(), StorageError>;

    /// Pushes any buffered state to the backing medium.
    async fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Storage that keeps records in process memory only.
///
/// Used when no durable location is configured, and in tests. It can be seeded so an
/// actor hydrates from a known state.
pub struct InMemoryStorage<T: ActorEntity> {
    records: HashMap<T::Id, T>,
}

impl<T: ActorEntity> InMemoryStorage<T> {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Seeds the storage with `records`; a later record wins on duplicate ids.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.id().clone(), record))
            .collect();
        Self { records }
    }
}

impl<T: ActorEntity> Default for InMemoryStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: ActorEntity> EntityStorage<T> for InMemoryStorage<T> {
    async fn load_all(&mut self) -> Result<Vec<T>, StorageError> {
        Ok(self.records.values().cloned().collect())
    }

    async fn save(&mut self, entity: &T) -> Result<(), StorageError> {
        self.records.insert(entity.id().clone(), entity.clone());
        Ok(())
    }

    async fn remove(&mut self, id: &T::Id) -> Result<(), StorageError> {
        self.records.remove(id);
        Ok(())
    }
}
