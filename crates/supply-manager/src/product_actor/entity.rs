//! [`ActorEntity`] implementation for [`Product`].
//!
//! Each hook forwards to the pure engine with the context's clock reading as `today`.

use super::actions::ProductAction;
use crate::clock::Clock;
use crate::config::ProductDefaults;
use crate::engine::{self, ProductError};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::sync::Arc;

/// Shared state injected into every Product hook.
#[derive(Clone)]
pub struct ProductContext {
    pub clock: Arc<dyn Clock>,
    pub defaults: ProductDefaults,
}

impl ProductContext {
    pub fn new(clock: Arc<dyn Clock>, defaults: ProductDefaults) -> Self {
        Self { clock, defaults }
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = Product;
    type Context = ProductContext;
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.product_id
    }

    fn from_create_params(params: ProductCreate, ctx: &ProductContext) -> Result<Self, ProductError> {
        engine::create_product(params, ctx.defaults, ctx.clock.today())
    }

    fn on_load(&self, ctx: &ProductContext) -> Result<(), ProductError> {
        engine::validate(self, ctx.clock.today())?;
        Ok(())
    }

    async fn on_update(&mut self, update: ProductUpdate, ctx: &ProductContext) -> Result<(), ProductError> {
        *self = engine::update_product(self, &update, ctx.clock.today())?;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        ctx: &ProductContext,
    ) -> Result<Product, ProductError> {
        let next = match action {
            ProductAction::ReplaceItem => engine::replace_item(self, ctx.clock.today()),
            ProductAction::AddStock(quantity) => engine::add_stock(self, quantity)?,
            ProductAction::RemoveStock(quantity) => engine::remove_stock(self, quantity)?,
        };
        *self = next.clone();
        Ok(next)
    }
}
