//! Typed clients for the running actors.

pub mod product_client;

pub use product_client::ProductClient;
