//! Application state shared across handlers

use crate::autocomplete::SuggestionEngine;
use crate::config::Settings;
use crate::locales::Language;
use crate::metrics::Metrics;
use crate::models::Catalog;
use crate::search::GlobalSearch;
use crate::store::RecordStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Suggestion builder over the reference catalog
    pub engine: SuggestionEngine,
    /// Global search executor
    pub search: Arc<GlobalSearch>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Create application state over an already loaded catalog
    pub fn new(settings: Settings, store: Arc<dyn RecordStore>, catalog: Catalog) -> Self {
        let metrics = Arc::new(Metrics::new());
        let search = GlobalSearch::new(store, settings.search.clone()).with_metrics(metrics.clone());

        Self {
            settings: Arc::new(settings),
            engine: SuggestionEngine::new(Arc::new(catalog)),
            search: Arc::new(search),
            metrics,
        }
    }

    /// Load the reference catalog once; an unreadable catalog leaves
    /// suggestions empty instead of failing startup.
    pub async fn load(settings: Settings, store: Arc<dyn RecordStore>) -> Self {
        let catalog = match store.catalog().await {
            Ok(catalog) => {
                info!(
                    "Loaded catalog: {} locations, {} categories",
                    catalog.locations().len(),
                    catalog.categories().len()
                );
                catalog
            }
            Err(e) => {
                warn!("Reference data unavailable, suggestions disabled: {:#}", e);
                Catalog::empty()
            }
        };
        Self::new(settings, store, catalog)
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }

    pub fn default_language(&self) -> Language {
        self.settings.default_language()
    }
}
