//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns a collection of
//! entities. It implements the "Server" side of the Actor Model: requests arrive over a
//! channel and are processed one at a time, so every load-modify-save cycle on a record
//! completes before the next request is even looked at.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::storage::{EntityStorage, InMemoryStorage};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the in-memory `store`, the
/// durable [`EntityStorage`] behind it, and the receiver end of the channel.
///
/// **Concurrency Model**:
/// The actor processes its messages *sequentially* in a loop, so the `store` needs no
/// `Mutex`. Two clients racing to modify the same record are simply queued; the second
/// one sees the first one's result.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` or `ResourceActor::with_storage()` returns the
///     `actor` (server) and the `client` (interface).
/// 2.  **Hydrate**: `actor.hydrate(&context)` loads persisted records.
/// 3.  **Run**: spawn `actor.run(context)` in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug, PartialEq)] struct Filter { id: String, stock: u32 }
/// #[derive(Debug)] struct FilterCreate { id: String }
/// #[derive(Debug)] struct FilterUpdate;
/// #[derive(Debug)] enum FilterAction {}
/// #[derive(Debug, thiserror::Error)] #[error("filter error")] struct FilterError;
///
/// #[async_trait]
/// impl ActorEntity for Filter {
///     type Id = String;
///     type Create = FilterCreate;
///     type Update = FilterUpdate;
///     type Action = FilterAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = FilterError;
///
///     fn id(&self) -> &String { &self.id }
///     fn from_create_params(p: FilterCreate, _: &()) -> Result<Self, Self::Error> {
///         Ok(Self { id: p.id, stock: 0 })
///     }
///     async fn on_update(&mut self, _: FilterUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: FilterAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (mut actor, client) = ResourceActor::<Filter>::new(10);
///     actor.hydrate(&()).await.unwrap();
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(FilterCreate { id: "hepa".into() }).await.unwrap();
///     assert_eq!(id, "hepa");
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    storage: Box<dyn EntityStorage<T>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an actor whose records live only in memory.
    ///
    /// `buffer_size` is the capacity of the request channel; when it is full, client
    /// calls wait for space. A size of zero is raised to one.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::with_storage(buffer_size, InMemoryStorage::new())
    }

    /// Creates an actor backed by `storage`.
    pub fn with_storage(
        buffer_size: usize,
        storage: impl EntityStorage<T> + 'static,
    ) -> (Self, ResourceClient<T>) {
        if buffer_size == 0 {
            warn!(entity_type = entity_type::<T>(), "Channel buffer of 0 raised to 1");
        }
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let actor = Self {
            receiver,
            store: HashMap::new(),
            storage: Box::new(storage),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Loads every persisted record into the in-memory store.
    ///
    /// Each record passes through [`ActorEntity::on_load`]; the first rejected record or
    /// duplicate id aborts hydration and leaves the store empty. Returns the number of
    /// records loaded.
    pub async fn hydrate(&mut self, context: &T::Context) -> Result<usize, FrameworkError> {
        let entity_type = entity_type::<T>();
        let records = self.storage.load_all().await?;

        let mut store = HashMap::with_capacity(records.len());
        for record in records {
            if let Err(e) = record.on_load(context) {
                warn!(entity_type, id = %record.id(), error = %e, "Rejected stored record");
                return Err(FrameworkError::entity(e));
            }
            let id = record.id().clone();
            if store.insert(id.clone(), record).is_some() {
                warn!(entity_type, %id, "Duplicate stored record");
                return Err(FrameworkError::AlreadyExists(id.to_string()));
            }
        }

        self.store = store;
        info!(entity_type, size = self.store.len(), "Hydrated");
        Ok(self.store.len())
    }

    /// Runs the actor's event loop until every client has been dropped, then flushes
    /// storage.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) -> Result<(), FrameworkError> {
        let entity_type = entity_type::<T>();
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = match self.store.get(&id).cloned() {
                        Some(mut next) => match next.on_update(update, &context).await {
                            Ok(()) => self.commit(next.clone()).await.map(|_| next),
                            Err(e) => Err(FrameworkError::entity(e)),
                        },
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = match self.store.get(&id).cloned() {
                        Some(mut next) => match next.handle_action(action, &context).await {
                            Ok(output) => self.commit(next).await.map(|_| output),
                            Err(e) => Err(FrameworkError::entity(e)),
                        },
                        None => Err(FrameworkError::NotFound(id.to_string())),
                    };
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        if let Err(e) = self.storage.flush().await {
            error!(entity_type, error = %e, "Flush failed");
            return Err(e.into());
        }
        info!(entity_type, size = self.store.len(), "Shutdown");
        Ok(())
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let mut item = T::from_create_params(params, context).map_err(FrameworkError::entity)?;
        item.on_create(context)
            .await
            .map_err(FrameworkError::entity)?;

        let id = item.id().clone();
        if self.store.contains_key(&id) {
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }
        self.storage.save(&item).await?;
        self.store.insert(id.clone(), item);
        Ok(id)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete(context)
            .await
            .map_err(FrameworkError::entity)?;
        self.storage.remove(id).await?;
        self.store.remove(id);
        Ok(())
    }

    /// Makes `next` the stored version of its record.
    ///
    /// Durable storage is written first; the in-memory store only changes once that
    /// write succeeded. Unchanged records are not written at all.
    async fn commit(&mut self, next: T) -> Result<(), FrameworkError> {
        if self.store.get(next.id()) == Some(&next) {
            return Ok(());
        }
        self.storage.save(&next).await?;
        self.store.insert(next.id().clone(), next);
        Ok(())
    }
}

/// Short type name for log fields, e.g. "Product" rather than the full module path.
fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
