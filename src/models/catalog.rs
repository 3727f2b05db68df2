//! Immutable reference data shared by the suggestion engine

use super::{Category, Location, Subcategory};
use std::collections::HashSet;
use thiserror::Error;

/// Reference data violations found while loading
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate location id '{0}'")]
    DuplicateLocation(String),
    #[error("duplicate category id '{0}'")]
    DuplicateCategory(String),
    #[error("duplicate subcategory id '{subcategory}' in category '{category}'")]
    DuplicateSubcategory { category: String, subcategory: String },
    #[error("subcategory '{subcategory}' is listed under '{owner}' but references '{referenced}'")]
    ForeignSubcategory {
        subcategory: String,
        owner: String,
        referenced: String,
    },
}

/// Locations and the category tree, loaded once and never mutated
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locations: Vec<Location>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and broken back-references.
    pub fn new(locations: Vec<Location>, categories: Vec<Category>) -> Result<Self, CatalogError> {
        let catalog = Self {
            locations,
            categories,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// An empty catalog; every lookup against it yields nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for location in &self.locations {
            if !seen.insert(location.id.as_str()) {
                return Err(CatalogError::DuplicateLocation(location.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }

            let mut children = HashSet::new();
            for sub in &category.subcategories {
                if sub.category_id != category.id {
                    return Err(CatalogError::ForeignSubcategory {
                        subcategory: sub.id.clone(),
                        owner: category.id.clone(),
                        referenced: sub.category_id.clone(),
                    });
                }
                if !children.insert(sub.id.as_str()) {
                    return Err(CatalogError::DuplicateSubcategory {
                        category: category.id.clone(),
                        subcategory: sub.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every subcategory paired with its owner, in category order.
    pub fn subcategories(&self) -> impl Iterator<Item = (&Subcategory, &Category)> {
        self.categories
            .iter()
            .flat_map(|category| category.subcategories.iter().map(move |sub| (sub, category)))
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.categories.is_empty()
    }
}
