//! Product-specific resource logic: the actor that is the product store.

mod actions;
pub mod entity;

pub use actions::*;
pub use entity::ProductContext;
pub use crate::engine::ProductError;

use crate::clients::ProductClient;
use crate::clock::Clock;
use crate::model::Product;
use actor_framework::{EntityStorage, ResourceActor};
use std::sync::Arc;

/// Creates a Product actor persisting through `storage`, and its client.
///
/// The clock is shared with the client so returned states are computed for the same
/// day the actor applied the command on.
pub fn with_storage(
    buffer_size: usize,
    storage: impl EntityStorage<Product> + 'static,
    clock: Arc<dyn Clock>,
) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::with_storage(buffer_size, storage);
    (actor, ProductClient::new(generic_client, clock))
}
