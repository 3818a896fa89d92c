//! Pure data structures managed by the product actor.

pub mod product;

pub use product::*;
