use actor_framework::{ActorClient, InMemoryStorage};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use supply_manager::clock::FixedClock;
use supply_manager::config::{ConfigError, SupplyConfig};
use supply_manager::dispatcher::Command;
use supply_manager::engine::ProductField;
use supply_manager::lifecycle::SupplySystem;
use supply_manager::model::{Product, ProductCreate, ProductId, ProductUpdate};
use supply_manager::product_actor::ProductError;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn water_filter() -> Product {
    Product::new("water_filter", "Water Filter", 3, 90, day(2024, 1, 15))
}

async fn start_at(today: NaiveDate, records: Vec<Product>) -> (SupplySystem, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(today));
    let system = SupplySystem::with_storage(
        &SupplyConfig::default(),
        InMemoryStorage::with_records(records),
        clock.clone(),
    )
    .await
    .expect("Failed to start system");
    (system, clock)
}

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("supply-manager-it-{}", uuid::Uuid::new_v4()))
}

/// The documented walk-through: query, replace, then the failure cases.
#[tokio::test]
async fn test_command_scenarios_end_to_end() {
    let (system, _clock) = start_at(day(2024, 2, 14), vec![water_filter()]).await;
    let id = ProductId::new("water_filter");
    let dispatcher = system.dispatcher().clone();

    let state = system.product_client.state(id.clone()).await.unwrap();
    assert_eq!(state.days_until_replacement, 60);

    let state = dispatcher
        .dispatch(Command::ReplaceItem {
            product_id: id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(state.last_replacement_date, day(2024, 2, 14));
    assert_eq!(state.stock_quantity, 2);
    assert_eq!(state.days_until_replacement, 90);

    let err = dispatcher
        .dispatch(Command::AddStock {
            product_id: id.clone(),
            quantity: -2,
        })
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::InvalidQuantity(-2));

    let state = dispatcher
        .dispatch(Command::UpdateProduct {
            product_id: id.clone(),
            fields: ProductUpdate::default().with_stock(5).with_interval(30),
        })
        .await
        .unwrap();
    assert_eq!(state.stock_quantity, 5);
    assert_eq!(state.replacement_interval_days, 30);
    assert_eq!(state.product_name, "Water Filter");
    assert_eq!(state.last_replacement_date, day(2024, 2, 14));

    drop(dispatcher);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_commands_leave_record_intact() {
    let mut empty = water_filter();
    empty.stock_quantity = 0;
    let (system, _clock) = start_at(day(2024, 2, 14), vec![empty.clone()]).await;
    let id = ProductId::new("water_filter");

    let err = system
        .dispatcher()
        .dispatch(Command::RemoveStock {
            product_id: id.clone(),
            quantity: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ProductError::InsufficientStock {
            requested: 1,
            available: 0
        }
    );

    let err = system
        .product_client
        .update_product(
            id.clone(),
            ProductUpdate::default().with_name("Jug filter").with_interval(0),
        )
        .await
        .unwrap_err();
    assert!(
        matches!(err, ProductError::Validation(ref e) if e.field == ProductField::ReplacementIntervalDays)
    );

    let stored = system.product_client.get(id).await.unwrap().unwrap();
    assert_eq!(stored, empty);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_replace_at_zero_stock_still_dates_today() {
    let mut empty = water_filter();
    empty.stock_quantity = 0;
    let (system, clock) = start_at(day(2024, 2, 14), vec![empty]).await;
    clock.advance(10);

    let state = system
        .product_client
        .replace_item("water_filter".into())
        .await
        .unwrap();
    assert_eq!(state.stock_quantity, 0);
    assert!(state.out_of_stock);
    assert_eq!(state.last_replacement_date, day(2024, 2, 24));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_days_follow_the_clock() {
    let (system, clock) = start_at(day(2024, 2, 14), vec![water_filter()]).await;
    let id = ProductId::new("water_filter");

    clock.set(day(2024, 4, 24));
    let state = system.product_client.state(id).await.unwrap();
    assert_eq!(state.days_until_replacement, -10);
    assert_eq!(state.next_replacement_date, Some(day(2024, 4, 14)));
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_create_remove_and_duplicates() {
    let (system, _clock) = start_at(day(2024, 5, 1), vec![]).await;
    let client = &system.product_client;

    let id = client
        .create_product(ProductCreate::new("Dish Sponge"))
        .await
        .unwrap();
    assert_eq!(id.as_str(), "dish_sponge");

    let state = client.state(id.clone()).await.unwrap();
    assert_eq!(state.stock_quantity, 1);
    assert_eq!(state.replacement_interval_days, 30);
    assert_eq!(state.last_replacement_date, day(2024, 5, 1));

    client.add_stock(id.clone(), 4).await.unwrap();
    let err = client
        .create_product(ProductCreate::new("Dish Sponge"))
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::AlreadyExists(id.clone()));
    assert_eq!(client.state(id.clone()).await.unwrap().stock_quantity, 5);

    let err = client
        .create_product(ProductCreate::new("Descaler").with_stock(-1))
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::Validation(ref e) if e.field == ProductField::StockQuantity));

    let custom = client
        .create_product(ProductCreate::new("Sponge").with_id("kitchen_sponge"))
        .await
        .unwrap();
    assert_eq!(custom.as_str(), "kitchen_sponge");
    client.remove_product(custom).await.unwrap();

    client.remove_product(id.clone()).await.unwrap();
    assert_eq!(client.state(id.clone()).await, Err(ProductError::NotFound(id.clone())));
    assert_eq!(client.remove_product(id.clone()).await, Err(ProductError::NotFound(id)));
    assert!(client.list_products().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let (system, _clock) = start_at(day(2024, 5, 1), vec![]).await;
    for command in [
        Command::ReplaceItem {
            product_id: "ghost".into(),
        },
        Command::AddStock {
            product_id: "ghost".into(),
            quantity: 1,
        },
        Command::UpdateProduct {
            product_id: "ghost".into(),
            fields: ProductUpdate::default().with_stock(1),
        },
    ] {
        let err = system.dispatcher().dispatch(command).await.unwrap_err();
        assert_eq!(err, ProductError::NotFound("ghost".into()));
    }
    system.shutdown().await.unwrap();
}

/// Concurrent removals from the same prior quantity must not both succeed.
#[tokio::test]
async fn test_concurrent_removals_are_serialized() {
    let mut filter = water_filter();
    filter.stock_quantity = 10;
    let (system, _clock) = start_at(day(2024, 2, 14), vec![filter]).await;

    let mut handles = vec![];
    for _ in 0..6 {
        let dispatcher = system.dispatcher().clone();
        handles.push(tokio::spawn(async move {
            dispatcher
                .dispatch(Command::RemoveStock {
                    product_id: "water_filter".into(),
                    quantity: 4,
                })
                .await
        }));
    }

    let mut successful = 0;
    let mut insufficient = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successful += 1,
            Err(ProductError::InsufficientStock { .. }) => insufficient += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(successful, 2);
    assert_eq!(insufficient, 4);

    let state = system
        .product_client
        .state("water_filter".into())
        .await
        .unwrap();
    assert_eq!(state.stock_quantity, 2);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_json_store_survives_restart() {
    let dir = scratch_dir();
    let config = SupplyConfig::default().with_storage_path(dir.join("products.json"));
    let clock = Arc::new(FixedClock::new(day(2024, 2, 14)));

    let system = SupplySystem::start_with_clock(&config, clock.clone())
        .await
        .unwrap();
    let id = system
        .product_client
        .create_product(
            ProductCreate::new("Water Filter")
                .with_stock(3)
                .with_interval(90)
                .with_last_replacement(day(2024, 1, 15)),
        )
        .await
        .unwrap();
    system
        .dispatcher()
        .dispatch(Command::ReplaceItem {
            product_id: id.clone(),
        })
        .await
        .unwrap();
    system.shutdown().await.unwrap();

    let system = SupplySystem::start_with_clock(&config, clock).await.unwrap();
    let state = system.product_client.state(id).await.unwrap();
    assert_eq!(state.stock_quantity, 2);
    assert_eq!(state.last_replacement_date, day(2024, 2, 14));
    assert_eq!(state.days_until_replacement, 90);
    system.shutdown().await.unwrap();

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_invalid_stored_record_aborts_startup() {
    let mut future = water_filter();
    future.last_replacement_date = day(2024, 3, 1);
    let clock = Arc::new(FixedClock::new(day(2024, 2, 14)));

    let result = SupplySystem::with_storage(
        &SupplyConfig::default(),
        InMemoryStorage::with_records(vec![future]),
        clock,
    )
    .await;
    match result {
        Err(ProductError::Validation(e)) => assert_eq!(e.field, ProductField::LastReplacementDate),
        Err(other) => panic!("expected validation error, got {other:?}"),
        Ok(_) => panic!("startup should have failed"),
    }
}

#[tokio::test]
async fn test_corrupt_store_file_aborts_startup() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("products.json"), "{ not json").unwrap();
    let config = SupplyConfig::default().with_storage_path(dir.join("products.json"));

    let result = SupplySystem::start_with_clock(&config, Arc::new(FixedClock::new(day(2024, 2, 14)))).await;
    assert!(matches!(result, Err(ProductError::Storage(_))));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_unusable_config_is_rejected_at_startup() {
    let clock = Arc::new(FixedClock::new(day(2024, 2, 14)));

    let zero_buffer = SupplyConfig {
        channel_buffer: 0,
        ..Default::default()
    };
    let result = SupplySystem::start_with_clock(&zero_buffer, clock.clone()).await;
    assert!(matches!(
        result,
        Err(ProductError::Config(ConfigError::InvalidValue {
            key: "channel_buffer",
            ..
        }))
    ));

    let zero_interval = SupplyConfig {
        default_replacement_interval_days: 0,
        ..Default::default()
    };
    let result = SupplySystem::start_with_clock(&zero_interval, clock).await;
    assert!(matches!(
        result,
        Err(ProductError::Config(ConfigError::InvalidValue {
            key: "default_replacement_interval_days",
            ..
        }))
    ));
}
