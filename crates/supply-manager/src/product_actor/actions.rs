//! Custom actions for the Product actor.
//!
//! The stock commands beyond a plain field update. Each is handled by
//! [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action) on a copy
//! of the stored record, and the resulting record is returned to the caller.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
    /// Marks the item as replaced today, consuming one unit of stock.
    ReplaceItem,
    /// Adds stock. The quantity must be at least 1.
    AddStock(i64),
    /// Removes stock. Fails rather than going below zero.
    RemoveStock(i64),
}
