//! dirsearch: search and suggestion engine for a localized business directory
//!
//! Multi-source autocomplete over locations, categories and subcategories,
//! plus a global search over businesses, events and categories with
//! fallback suggestions for empty results.

pub mod autocomplete;
pub mod config;
pub mod locales;
pub mod matching;
pub mod metrics;
pub mod models;
pub mod results;
pub mod search;
pub mod store;
pub mod web;

pub use autocomplete::{Autocomplete, SuggestionEngine};
pub use config::Settings;
pub use search::{GlobalSearch, SearchError, SearchRequest};
pub use store::{MemoryStore, RecordStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
