//! wt-core: stable foundation for the well-test analysis crates.
//!
//! Contains:
//! - numeric (Real, finiteness check, cell conversion)
//! - series (time/value samples)
//! - ids (stable compact IDs for overlay items)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod series;

// Re-exports: nice ergonomics for downstream crates
pub use error::{WtError, WtResult};
pub use ids::*;
pub use numeric::*;
pub use series::*;
