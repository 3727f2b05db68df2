//! In-memory store loaded from a YAML dataset

use super::traits::{RecordStore, StoreError};
use crate::models::{Business, Catalog, Category, Event, Location};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Everything the directory exports to the search engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub locations: Vec<Location>,
    pub categories: Vec<Category>,
    pub businesses: Vec<Business>,
    pub events: Vec<Event>,
}

/// Read-only snapshot held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    dataset: Dataset,
}

impl MemoryStore {
    /// Wrap a dataset after checking its reference data.
    pub fn new(dataset: Dataset) -> Result<Self> {
        Catalog::new(dataset.locations.clone(), dataset.categories.clone())
            .context("invalid reference data")?;
        Ok(Self { dataset })
    }

    /// Load a dataset from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading dataset {}", path.display()))?;
        let dataset: Dataset = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing dataset {}", path.display()))?;

        info!(
            "Loaded dataset {}: {} locations, {} categories, {} businesses, {} events",
            path.display(),
            dataset.locations.len(),
            dataset.categories.len(),
            dataset.businesses.len(),
            dataset.events.len()
        );

        Self::new(dataset)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn locations(&self) -> Result<Vec<Location>, StoreError> {
        Ok(self.dataset.locations.clone())
    }

    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.dataset.categories.clone())
    }

    async fn businesses(&self) -> Result<Vec<Business>, StoreError> {
        Ok(self.dataset.businesses.clone())
    }

    async fn events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.dataset.events.clone())
    }
}
