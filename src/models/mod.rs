//! Core data models.

mod metadata;
mod nature;
mod stats;
mod usage;

pub use metadata::*;
pub use nature::*;
pub use stats::*;
pub use usage::*;
