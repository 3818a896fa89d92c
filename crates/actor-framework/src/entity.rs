//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a resource must satisfy to be owned by a
//! [`ResourceActor`](crate::ResourceActor). It names the identifier, the create/update
//! DTOs, the custom actions, the injected context and the error type, and exposes the
//! lifecycle hooks the actor calls while processing requests.
//!
//! # Identity
//! Entities carry their own identifier ([`ActorEntity::id`]). The actor never invents
//! ids: whatever `from_create_params` produces is the durable key, and a second create
//! with the same key is rejected with [`FrameworkError::AlreadyExists`](crate::FrameworkError::AlreadyExists).
//!
//! # Functional updates
//! Hooks receive a `&mut self`, but that `self` is always a scratch clone of the stored
//! record. The actor only swaps the clone into its store (and into durable storage)
//! after the hook returned `Ok`, so a failing hook can never leave a half-applied
//! record behind.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::on_load`]
//!
//! The defaults do nothing (`Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks may await other actors. The `Context` type
/// is injected into every hook, which lets dependencies (clients, clocks, defaults) be
/// bound when the actor starts rather than when it is constructed.
///
/// `PartialEq` is required so the actor can skip the storage write when a request
/// leaves the record unchanged.
#[async_trait]
pub trait ActorEntity: Clone + PartialEq + Send + Sync + 'static {
    /// The unique, durable identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `AddStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum covers every hook of the entity. Clients recover it from
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) by downcasting.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The key this record is stored under.
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from the create payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(params: Self::Create, ctx: &Self::Context) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    /// Called for every record read back from storage while the actor hydrates.
    /// Returning an error aborts hydration.
    fn on_load(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
