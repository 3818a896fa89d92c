//! Routes inbound commands to the product store.
//!
//! A [`Command`] is a typed value. JSON callers address it by service name, e.g.
//! `{"service": "add_stock", "product_id": "water_filter", "quantity": 2}`.

use crate::clients::ProductClient;
use crate::engine::ProductState;
use crate::model::{ProductId, ProductUpdate};
use crate::product_actor::ProductError;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "service", rename_all = "snake_case")]
pub enum Command {
    ReplaceItem {
        product_id: ProductId,
    },
    AddStock {
        product_id: ProductId,
        quantity: i64,
    },
    RemoveStock {
        product_id: ProductId,
        quantity: i64,
    },
    UpdateProduct {
        product_id: ProductId,
        #[serde(flatten)]
        fields: ProductUpdate,
    },
}

impl Command {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn product_id(&self) -> &ProductId {
        match self {
            Command::ReplaceItem { product_id }
            | Command::AddStock { product_id, .. }
            | Command::RemoveStock { product_id, .. }
            | Command::UpdateProduct { product_id, .. } => product_id,
        }
    }

    /// Service name, as used in the `service` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ReplaceItem { .. } => "replace_item",
            Command::AddStock { .. } => "add_stock",
            Command::RemoveStock { .. } => "remove_stock",
            Command::UpdateProduct { .. } => "update_product",
        }
    }
}

/// Applies commands against the product store and reports the resulting state.
#[derive(Clone)]
pub struct CommandDispatcher {
    products: ProductClient,
}

impl CommandDispatcher {
    pub fn new(products: ProductClient) -> Self {
        Self { products }
    }

    /// Runs one command to completion. On error the stored record is unchanged.
    #[instrument(skip(self, command), fields(service = command.name(), product_id = %command.product_id()))]
    pub async fn dispatch(&self, command: Command) -> Result<ProductState, ProductError> {
        let result = match command {
            Command::ReplaceItem { product_id } => self.products.replace_item(product_id).await,
            Command::AddStock {
                product_id,
                quantity,
            } => self.products.add_stock(product_id, quantity).await,
            Command::RemoveStock {
                product_id,
                quantity,
            } => self.products.remove_stock(product_id, quantity).await,
            Command::UpdateProduct { product_id, fields } => {
                self.products.update_product(product_id, fields).await
            }
        };
        match &result {
            Ok(state) => info!(
                stock = state.stock_quantity,
                days = state.days_until_replacement,
                "Command applied"
            ),
            Err(e) => warn!(error = %e, "Command rejected"),
        }
        result
    }
}
