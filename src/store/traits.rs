//! Store traits and errors

use crate::models::{Business, Catalog, Category, Event, Location};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure reading from the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// One collection could not be read; others may still work.
    #[error("collection unavailable: {0}")]
    Unavailable(String),
    /// The store as a whole is down.
    #[error("store offline: {0}")]
    Offline(String),
}

/// Persisted collections the global search fans out over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Businesses,
    Events,
    Categories,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Self::Businesses, Self::Events, Self::Categories];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Businesses => "businesses",
            Self::Events => "events",
            Self::Categories => "categories",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only access to directory data
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Store name for logs
    fn name(&self) -> &str;

    async fn locations(&self) -> Result<Vec<Location>, StoreError>;

    /// Category tree, including inactive categories
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn businesses(&self) -> Result<Vec<Business>, StoreError>;

    async fn events(&self) -> Result<Vec<Event>, StoreError>;

    /// Load the reference data the suggestion engine works on.
    async fn catalog(&self) -> anyhow::Result<Catalog> {
        let locations = self.locations().await?;
        let categories = self.categories().await?;
        Ok(Catalog::new(locations, categories)?)
    }
}
