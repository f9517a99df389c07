//! glv-core: shared foundation for the GLV workspace.
//!
//! Contains:
//! - numeric (tolerances + finiteness checks)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{GlvError, GlvResult};
pub use numeric::*;
