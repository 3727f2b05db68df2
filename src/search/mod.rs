//! Global search module
//!
//! Fans a query out over businesses, events and categories, merges the
//! counts, and falls back to location and category suggestions when
//! nothing matched.

mod error;
mod executor;
mod fallback;
mod models;

pub use error::SearchError;
pub use executor::GlobalSearch;
pub use fallback::fallback_suggestions;
pub use models::*;
