//! # Actor Framework
//!
//! Building blocks for keeping a collection of stateful records behind a single Tokio
//! task. It combines a **Resource-Oriented** request set (create, get, list, update,
//! delete, plus custom actions) with the **Actor Model**: one task owns the records and
//! applies requests strictly one after another.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - your record type and its business rules
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and the in-memory store
//! 3. **Persistence Layer** ([`EntityStorage`]) - where records survive restarts
//! 4. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe requests
//!
//! ## Guarantees
//!
//! - Requests are processed **sequentially**: a read-modify-write on a record can never
//!   interleave with another request, so no update is lost.
//! - Hooks work on a **clone** of the stored record. The clone replaces the stored
//!   version only after the hook succeeded and the storage write succeeded.
//! - One record per id: creating an id that already exists fails with
//!   [`FrameworkError::AlreadyExists`].
//!
//! ## Lifecycle
//!
//! ```rust,ignore
//! let (mut actor, client) = ResourceActor::with_storage(32, storage);
//! actor.hydrate(&context).await?;               // load persisted records
//! let handle = tokio::spawn(actor.run(context)); // serve requests
//! // ...
//! drop(client);                                  // last client gone: loop exits
//! handle.await??;                                // storage flushed
//! ```
//!
//! ## Testing
//!
//! Enable the `mock` feature for [`mock::MockClient`] and the request-capturing
//! helpers, which stand in for a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod storage;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use storage::{EntityStorage, InMemoryStorage, StorageError};
