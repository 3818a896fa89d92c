use crate::clock::Clock;
use crate::engine::ProductState;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
///
/// Every mutating call returns the product's state as of today, read from the same
/// clock the actor uses.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    clock: Arc<dyn Clock>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>, clock: Arc<dyn Clock>) -> Self {
        Self { inner, clock }
    }

    fn state_of(&self, product: &Product) -> ProductState {
        ProductState::at(product, self.clock.today())
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    /// Recovers the typed error: lookups become `NotFound`, hook failures are unwrapped
    /// back into the engine's own variant.
    fn map_error(e: FrameworkError) -> ProductError {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(ProductId::new(id)),
            FrameworkError::AlreadyExists(id) => ProductError::AlreadyExists(ProductId::new(id)),
            FrameworkError::EntityError(inner) => match inner.downcast::<ProductError>() {
                Ok(e) => *e,
                Err(other) => ProductError::ActorCommunication(other.to_string()),
            },
            FrameworkError::Storage(e) => ProductError::Storage(e.to_string()),
            other => ProductError::ActorCommunication(other.to_string()),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn state(&self, id: ProductId) -> Result<ProductState, ProductError> {
        match self.get(id.clone()).await? {
            Some(product) => Ok(self.state_of(&product)),
            None => Err(ProductError::NotFound(id)),
        }
    }

    /// Every product, ordered by id.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductState>, ProductError> {
        let mut products = self.list().await?;
        products.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        Ok(products.iter().map(|p| self.state_of(p)).collect())
    }

    #[instrument(skip(self))]
    pub async fn replace_item(&self, id: ProductId) -> Result<ProductState, ProductError> {
        self.act(id, ProductAction::ReplaceItem).await
    }

    #[instrument(skip(self))]
    pub async fn add_stock(&self, id: ProductId, quantity: i64) -> Result<ProductState, ProductError> {
        self.act(id, ProductAction::AddStock(quantity)).await
    }

    #[instrument(skip(self))]
    pub async fn remove_stock(
        &self,
        id: ProductId,
        quantity: i64,
    ) -> Result<ProductState, ProductError> {
        self.act(id, ProductAction::RemoveStock(quantity)).await
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductState, ProductError> {
        debug!("Sending request");
        let product = self.inner.update(id, update).await.map_err(Self::map_error)?;
        Ok(self.state_of(&product))
    }

    /// Stock control: an update carrying only the quantity.
    pub async fn set_stock(&self, id: ProductId, quantity: i64) -> Result<ProductState, ProductError> {
        self.update_product(id, ProductUpdate::default().with_stock(quantity))
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: ProductId) -> Result<(), ProductError> {
        self.delete(id).await
    }

    async fn act(&self, id: ProductId, action: ProductAction) -> Result<ProductState, ProductError> {
        debug!(?action, "Sending request");
        let product = self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?;
        Ok(self.state_of(&product))
    }
}
