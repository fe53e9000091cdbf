//! Route handlers, grouped by resource.

pub mod formats;
pub mod meta;
pub mod pokemon;

use serde::Deserialize;

/// `?rating=` on format-scoped routes.
#[derive(Debug, Default, Deserialize)]
pub struct RatingParams {
    pub rating: Option<u32>,
}
