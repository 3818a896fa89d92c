//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber.
//!
//! The actor loop logs every request with an `entity_type` field and the record `id`:
//! `info` for successful operations, `warn` for rejected ones, `debug` for full
//! payloads. Client methods open an `#[instrument]` span around the caller's side.
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per operation
//! RUST_LOG=debug cargo run     # payloads included
//! RUST_LOG=supply_manager=debug,actor_framework=info cargo run
//! ```
//!
//! ```text
//! INFO Hydrated entity_type="Product" size=2
//! INFO Action ok entity_type="Product" id=water_filter
//! INFO dispatch{service="remove_stock" product_id=water_filter}: Command applied stock=2 days=90
//! WARN Action failed entity_type="Product" id=toothbrush error=Insufficient stock: requested 1, available 0
//! ```

/// Initializes the global subscriber, filtered by `RUST_LOG`.
///
/// Module paths are hidden because every framework event already carries
/// `entity_type`. Calling this twice panics, as with any global subscriber.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
