//! Demo run: registers a product, applies a few commands and prints the results.
//!
//! Set `SUPPLY_MANAGER_STORAGE` to keep products in a JSON file between runs.

use actor_framework::tracing::setup_tracing;
use supply_manager::config::SupplyConfig;
use supply_manager::dispatcher::Command;
use supply_manager::lifecycle::SupplySystem;
use supply_manager::model::{ProductCreate, ProductId};
use supply_manager::product_actor::ProductError;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = SupplyConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting home supply manager");

    let system = SupplySystem::start(&config)
        .await
        .map_err(|e| e.to_string())?;

    let params = ProductCreate::new("Water Filter")
        .with_stock(3)
        .with_interval(90);
    let product_id = match system.product_client.create_product(params).await {
        Ok(id) => id,
        Err(ProductError::AlreadyExists(id)) => {
            info!(%id, "Product already tracked");
            id
        }
        Err(e) => return Err(e.to_string()),
    };
    info!(%product_id, "Product registered");

    let commands = [
        Command::ReplaceItem {
            product_id: product_id.clone(),
        },
        Command::AddStock {
            product_id: product_id.clone(),
            quantity: 2,
        },
        Command::RemoveStock {
            product_id: product_id.clone(),
            quantity: 100,
        },
    ];
    for command in commands {
        if let Err(e) = system.dispatcher().dispatch(command).await {
            warn!(error = %e, "Command failed");
        }
    }

    let raw = format!(r#"{{"service": "update_product", "product_id": "{product_id}", "replacement_interval_days": 60}}"#);
    match Command::from_json(&raw) {
        Ok(command) => {
            if let Err(e) = system.dispatcher().dispatch(command).await {
                warn!(error = %e, "Command failed");
            }
        }
        Err(e) => warn!(error = %e, "Could not decode command"),
    }

    let missing = system
        .dispatcher()
        .dispatch(Command::ReplaceItem {
            product_id: ProductId::new("does_not_exist"),
        })
        .await;
    info!(result = ?missing, "Unknown product");

    for state in system
        .product_client
        .list_products()
        .await
        .map_err(|e| e.to_string())?
    {
        info!(
            product_id = %state.product_id,
            name = %state.product_name,
            stock = state.stock_quantity,
            days_until_replacement = state.days_until_replacement,
            next = ?state.next_replacement_date,
            "Product state"
        );
    }

    system.shutdown().await.map_err(|e| e.to_string())?;
    Ok(())
}
