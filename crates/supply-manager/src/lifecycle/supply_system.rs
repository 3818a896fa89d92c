use crate::clients::ProductClient;
use crate::clock::{Clock, SystemClock};
use crate::config::SupplyConfig;
use crate::dispatcher::CommandDispatcher;
use crate::model::Product;
use crate::product_actor::{self, ProductContext, ProductError};
use crate::storage::JsonFileStorage;
use actor_framework::{ActorClient, EntityStorage, FrameworkError, InMemoryStorage};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running product store plus the handles to talk to it.
///
/// # Lifecycle
///
/// 1. [`SupplySystem::start`] checks the config, builds the storage backend from the config, loads every
///    persisted record (a record that fails validation aborts startup), and spawns the
///    product actor.
/// 2. Callers use [`SupplySystem::dispatcher`] or the product client.
/// 3. [`SupplySystem::shutdown`] closes the channel, waits for in-flight commands and
///    reports any storage flush failure.
///
/// ```ignore
/// let system = SupplySystem::start(&SupplyConfig::from_env()?).await?;
/// let state = system.dispatcher().dispatch(command).await?;
/// system.shutdown().await?;
/// ```
pub struct SupplySystem {
    /// Client for interacting with the Product actor
    pub product_client: ProductClient,

    dispatcher: CommandDispatcher,

    /// Actor task, resolved once the actor has flushed and stopped
    handle: JoinHandle<Result<(), FrameworkError>>,
}

impl SupplySystem {
    /// Starts with the host's calendar.
    pub async fn start(config: &SupplyConfig) -> Result<Self, ProductError> {
        Self::start_with_clock(config, Arc::new(SystemClock)).await
    }

    /// Starts with the storage named by `config`: a JSON file when a path is set,
    /// memory otherwise.
    pub async fn start_with_clock(
        config: &SupplyConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ProductError> {
        match &config.storage_path {
            Some(path) => {
                let storage = JsonFileStorage::new(path);
                info!(path = %storage.path().display(), "Using JSON file storage");
                Self::with_storage(config, storage, clock).await
            }
            None => {
                info!("Using in-memory storage");
                Self::with_storage(config, InMemoryStorage::new(), clock).await
            }
        }
    }

    pub async fn with_storage(
        config: &SupplyConfig,
        storage: impl EntityStorage<Product> + 'static,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ProductError> {
        config.validate()?;
        let (mut actor, product_client) =
            product_actor::with_storage(config.channel_buffer, storage, clock.clone());
        let context = ProductContext::new(clock, config.product_defaults());

        let loaded = actor
            .hydrate(&context)
            .await
            .map_err(ProductClient::map_error)?;
        info!(loaded, "Product store ready");

        let handle = tokio::spawn(actor.run(context));
        Ok(Self {
            dispatcher: CommandDispatcher::new(product_client.clone()),
            product_client,
            handle,
        })
    }

    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Stops the product actor once queued commands have been applied.
    ///
    /// Clones of the client or dispatcher held elsewhere keep the actor alive, so this
    /// only returns after those are dropped too.
    pub async fn shutdown(self) -> Result<(), ProductError> {
        info!("Shutting down system...");
        drop(self.dispatcher);
        drop(self.product_client);

        match self.handle.await {
            Ok(Ok(())) => {
                info!("System shutdown complete");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(error = %e, "Product actor stopped with an error");
                Err(ProductClient::map_error(e))
            }
            Err(e) => {
                error!(error = %e, "Product actor task failed");
                Err(ProductError::ActorCommunication(e.to_string()))
            }
        }
    }
}
