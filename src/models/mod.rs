//! Directory entities
//!
//! Reference data (locations, the category tree) and the searchable
//! records (businesses, events) as supplied by the persistence layer.

mod catalog;

pub use catalog::{Catalog, CatalogError};

use crate::locales::{Localized, LocalizedText, TextField};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// A city or area businesses and events are attached to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: LocalizedText,
}

impl Localized for Location {
    fn text(&self, field: TextField) -> Option<&LocalizedText> {
        match field {
            TextField::Name => Some(&self.name),
            TextField::Title | TextField::Description => None,
        }
    }
}

/// Top-level business category with its ordered subcategories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    /// Display icon (emoji or icon-font name)
    #[serde(default)]
    pub icon: Option<String>,
    /// Ascending display order
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl Localized for Category {
    fn text(&self, field: TextField) -> Option<&LocalizedText> {
        match field {
            TextField::Name => Some(&self.name),
            TextField::Description => self.description.as_ref(),
            TextField::Title => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    /// Owning category
    pub category_id: String,
}

impl Localized for Subcategory {
    fn text(&self, field: TextField) -> Option<&LocalizedText> {
        match field {
            TextField::Name => Some(&self.name),
            TextField::Description => self.description.as_ref(),
            TextField::Title => None,
        }
    }
}

/// A listed business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    pub city: String,
    #[serde(default)]
    pub location_id: Option<String>,
    pub category_id: String,
    #[serde(default)]
    pub subcategory_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
}

impl Business {
    /// Only active, verified listings are searchable.
    pub fn is_searchable(&self) -> bool {
        self.is_active && self.is_verified
    }
}

impl Localized for Business {
    fn text(&self, field: TextField) -> Option<&LocalizedText> {
        match field {
            TextField::Name => Some(&self.name),
            TextField::Description => self.description.as_ref(),
            TextField::Title => None,
        }
    }
}

/// A dated event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    pub city: String,
    #[serde(default)]
    pub location_id: Option<String>,
    pub category_id: String,
    pub start_date: DateTime<Utc>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Event {
    /// Published, active, and (when `upcoming_only`) starting after `now`.
    pub fn is_searchable(&self, upcoming_only: bool, now: DateTime<Utc>) -> bool {
        self.is_published && self.is_active && (!upcoming_only || self.start_date > now)
    }
}

impl Localized for Event {
    fn text(&self, field: TextField) -> Option<&LocalizedText> {
        match field {
            TextField::Title => Some(&self.title),
            TextField::Description => self.description.as_ref(),
            TextField::Name => None,
        }
    }
}
