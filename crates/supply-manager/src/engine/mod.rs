//! The product state engine: validation, derived values and command transitions.
//!
//! Everything here is synchronous and pure. Functions take the current record and an
//! explicit `today`, and hand back a new record; persistence is the caller's concern.

pub mod commands;
pub mod derived;
pub mod error;
pub mod validation;

pub use commands::*;
pub use derived::*;
pub use error::ProductError;
pub use validation::*;
