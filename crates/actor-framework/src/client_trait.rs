//! # ActorClient Trait
//!
//! Provides a common interface for resource‑specific clients, adding default `get`,
//! `list` and `delete` methods built on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard CRUD operations.
///
/// A domain client wraps a [`ResourceClient`] and only has to say how framework errors
/// translate into its own error type; the read and delete paths come for free.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug, PartialEq)] struct Battery { id: u32 }
/// #[derive(Debug)] struct BatteryCreate { id: u32 }
/// #[derive(Debug)] struct BatteryUpdate;
/// #[derive(Debug)] enum BatteryAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct BatteryError(String);
///
/// impl From<String> for BatteryError {
///     fn from(s: String) -> Self { BatteryError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Battery {
///     type Id = u32;
///     type Create = BatteryCreate;
///     type Update = BatteryUpdate;
///     type Action = BatteryAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = BatteryError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(p: BatteryCreate, _: &()) -> Result<Self, Self::Error> {
///         Ok(Self { id: p.id })
///     }
///     async fn on_update(&mut self, _: BatteryUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: BatteryAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct BatteryClient {
///     inner: ResourceClient<Battery>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Battery> for BatteryClient {
///     type Error = BatteryError;
///
///     fn inner(&self) -> &ResourceClient<Battery> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         BatteryError(e.to_string())
///     }
/// }
///
/// // get(), list() and delete() are provided automatically.
/// async fn usage(client: BatteryClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity held by the actor, in no particular order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
