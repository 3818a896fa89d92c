use actor_framework::{
    ActorEntity, EntityStorage, FrameworkError, InMemoryStorage, ResourceActor, StorageError,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Cartridge {
    id: String,
    label: String,
    stock: u32,
}

#[derive(Debug)]
struct CartridgeCreate {
    id: String,
    label: String,
}

#[derive(Debug)]
struct CartridgeUpdate {
    label: Option<String>,
    stock: Option<u32>,
}

#[derive(Debug)]
enum CartridgeAction {
    Consume(u32),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum CartridgeError {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("only {0} left")]
    Insufficient(u32),
}

#[async_trait]
impl ActorEntity for Cartridge {
    type Id = String;
    type Create = CartridgeCreate;
    type Update = CartridgeUpdate;
    type Action = CartridgeAction;
    type ActionResult = u32;
    type Context = ();
    type Error = CartridgeError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(params: CartridgeCreate, _ctx: &()) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(CartridgeError::EmptyLabel);
        }
        Ok(Self {
            id: params.id,
            label: params.label,
            stock: 0,
        })
    }

    fn on_load(&self, _ctx: &()) -> Result<(), Self::Error> {
        if self.label.is_empty() {
            return Err(CartridgeError::EmptyLabel);
        }
        Ok(())
    }

    async fn on_update(&mut self, update: CartridgeUpdate, _ctx: &()) -> Result<(), Self::Error> {
        // Stock is applied before the label check so a rejected update proves the
        // actor discards the partially modified clone.
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(label) = update.label {
            if label.is_empty() {
                return Err(CartridgeError::EmptyLabel);
            }
            self.label = label;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: CartridgeAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            CartridgeAction::Consume(n) => {
                if n > self.stock {
                    return Err(CartridgeError::Insufficient(self.stock));
                }
                self.stock -= n;
                Ok(self.stock)
            }
        }
    }
}

fn cartridge(id: &str, label: &str, stock: u32) -> Cartridge {
    Cartridge {
        id: id.to_string(),
        label: label.to_string(),
        stock,
    }
}

/// Storage whose writes can be switched off mid-test.
#[derive(Clone, Default)]
struct FlakyStorage {
    failing: Arc<AtomicBool>,
}

#[async_trait]
impl EntityStorage<Cartridge> for FlakyStorage {
    async fn load_all(&mut self) -> Result<Vec<Cartridge>, StorageError> {
        Ok(vec![cartridge("cyan", "Cyan", 4)])
    }

    async fn save(&mut self, _entity: &Cartridge) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::corrupt("disk unplugged"));
        }
        Ok(())
    }

    async fn remove(&mut self, _id: &String) -> Result<(), StorageError> {
        Ok(())
    }
}

// --- Tests ---

#[tokio::test]
async fn test_resource_actor_lifecycle() {
    let (mut actor, client) = ResourceActor::<Cartridge>::new(10);
    assert_eq!(actor.hydrate(&()).await.unwrap(), 0);
    let handle = tokio::spawn(actor.run(()));

    let id = client
        .create(CartridgeCreate {
            id: "black".into(),
            label: "Black".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, "black");

    let updated = client
        .update(
            id.clone(),
            CartridgeUpdate {
                label: None,
                stock: Some(3),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.stock, 3);

    let left = client
        .perform_action(id.clone(), CartridgeAction::Consume(2))
        .await
        .unwrap();
    assert_eq!(left, 1);

    assert_eq!(client.list().await.unwrap().len(), 1);

    client.delete(id.clone()).await.unwrap();
    assert!(client.get(id.clone()).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_zero_buffer_still_serves_requests() {
    let (mut actor, client) = ResourceActor::<Cartridge>::new(0);
    actor.hydrate(&()).await.unwrap();
    let handle = tokio::spawn(actor.run(()));

    let id = client
        .create(CartridgeCreate {
            id: "cyan".into(),
            label: "Cyan".into(),
        })
        .await
        .unwrap();
    assert!(client.get(id).await.unwrap().is_some());

    drop(client);
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_duplicate_create_is_rejected() {
    let (mut actor, client) = ResourceActor::<Cartridge>::new(10);
    actor.hydrate(&()).await.unwrap();
    tokio::spawn(actor.run(()));

    let params = || CartridgeCreate {
        id: "magenta".into(),
        label: "Magenta".into(),
    };
    client.create(params()).await.unwrap();
    client
        .update(
            "magenta".into(),
            CartridgeUpdate {
                label: None,
                stock: Some(5),
            },
        )
        .await
        .unwrap();

    let second = client.create(params()).await;
    assert!(matches!(second, Err(FrameworkError::AlreadyExists(id)) if id == "magenta"));

    // The first record survives untouched.
    let stored = client.get("magenta".into()).await.unwrap().unwrap();
    assert_eq!(stored.stock, 5);
}

#[tokio::test]
async fn test_failed_hook_leaves_record_untouched() {
    let (mut actor, client) = ResourceActor::<Cartridge>::new(10);
    actor.hydrate(&()).await.unwrap();
    tokio::spawn(actor.run(()));

    client
        .create(CartridgeCreate {
            id: "yellow".into(),
            label: "Yellow".into(),
        })
        .await
        .unwrap();

    let result = client
        .update(
            "yellow".into(),
            CartridgeUpdate {
                label: Some(String::new()),
                stock: Some(99),
            },
        )
        .await;
    match result {
        Err(FrameworkError::EntityError(inner)) => {
            let inner = inner.downcast::<CartridgeError>().unwrap();
            assert_eq!(*inner, CartridgeError::EmptyLabel);
        }
        other => panic!("expected EntityError, got {:?}", other),
    }

    let stored = client.get("yellow".into()).await.unwrap().unwrap();
    assert_eq!(stored, cartridge("yellow", "Yellow", 0));

    let action = client
        .perform_action("yellow".into(), CartridgeAction::Consume(1))
        .await;
    assert!(matches!(action, Err(FrameworkError::EntityError(_))));
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let (mut actor, client) = ResourceActor::<Cartridge>::new(10);
    actor.hydrate(&()).await.unwrap();
    tokio::spawn(actor.run(()));

    let result = client
        .perform_action("ghost".into(), CartridgeAction::Consume(1))
        .await;
    assert!(matches!(result, Err(FrameworkError::NotFound(id)) if id == "ghost"));

    let result = client.delete("ghost".into()).await;
    assert!(matches!(result, Err(FrameworkError::NotFound(_))));
}

#[tokio::test]
async fn test_hydrate_loads_and_validates_records() {
    let storage = InMemoryStorage::with_records(vec![
        cartridge("cyan", "Cyan", 2),
        cartridge("black", "Black", 1),
    ]);
    let (mut actor, client) = ResourceActor::<Cartridge>::with_storage(10, storage);
    assert_eq!(actor.hydrate(&()).await.unwrap(), 2);
    tokio::spawn(actor.run(()));
    assert_eq!(client.get("cyan".into()).await.unwrap().unwrap().stock, 2);

    let broken = InMemoryStorage::with_records(vec![cartridge("blank", "", 1)]);
    let (mut actor, _client) = ResourceActor::<Cartridge>::with_storage(10, broken);
    assert!(matches!(
        actor.hydrate(&()).await,
        Err(FrameworkError::EntityError(_))
    ));
}

#[tokio::test]
async fn test_storage_failure_rolls_back() {
    let storage = FlakyStorage::default();
    let failing = storage.failing.clone();
    let (mut actor, client) = ResourceActor::<Cartridge>::with_storage(10, storage);
    actor.hydrate(&()).await.unwrap();
    tokio::spawn(actor.run(()));

    failing.store(true, Ordering::SeqCst);
    let result = client
        .perform_action("cyan".into(), CartridgeAction::Consume(3))
        .await;
    assert!(matches!(result, Err(FrameworkError::Storage(_))));
    assert_eq!(client.get("cyan".into()).await.unwrap().unwrap().stock, 4);

    failing.store(false, Ordering::SeqCst);
    let left = client
        .perform_action("cyan".into(), CartridgeAction::Consume(3))
        .await
        .unwrap();
    assert_eq!(left, 1);
}

#[tokio::test]
async fn test_concurrent_actions_are_serialized() {
    let storage = InMemoryStorage::with_records(vec![cartridge("cyan", "Cyan", 10)]);
    let (mut actor, client) = ResourceActor::<Cartridge>::with_storage(32, storage);
    actor.hydrate(&()).await.unwrap();
    tokio::spawn(actor.run(()));

    let mut handles = vec![];
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .perform_action("cyan".into(), CartridgeAction::Consume(3))
                .await
        }));
    }

    let mut successful = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successful += 1;
        }
    }

    assert_eq!(successful, 3, "10 units cover exactly three takes of 3");
    assert_eq!(client.get("cyan".into()).await.unwrap().unwrap().stock, 1);
}
