//! # Home Supply Manager
//!
//! Tracks consumable household items: how much stock is left, how often each item
//! must be replaced and when it last was.
//!
//! - **[model]**: the [`Product`](model::Product) record and its create/update payloads.
//! - **[engine]**: pure validation, derived values and command transitions.
//! - **[product_actor]**: the product store, a [`ResourceActor`](actor_framework::ResourceActor)
//!   that serializes every load-modify-save.
//! - **[storage]**: durable backends for the store.
//! - **[clients]** and **[dispatcher]**: typed entry points for callers.
//! - **[lifecycle]**: starts and stops the whole thing.

pub mod clients;
pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
pub mod storage;
