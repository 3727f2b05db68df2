//! Result type definitions

use crate::locales::{localize_numeral, resolve, Language, Localized, TextField};
use crate::models::{Business, Category, Event, Location};
use crate::store::Collection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn optional_text<E: Localized>(
    entity: &E,
    field: TextField,
    lang: Language,
) -> Option<String> {
    let text = resolve(entity, field, lang);
    (!text.is_empty()).then(|| text.to_string())
}

/// A matching business, rendered in the requested language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHit {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub city: String,
    pub category_id: String,
    pub subcategory_id: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub href: String,
}

impl BusinessHit {
    pub fn new(business: &Business, lang: Language) -> Self {
        Self {
            id: business.id.clone(),
            name: resolve(business, TextField::Name, lang).to_string(),
            description: optional_text(business, TextField::Description, lang),
            city: business.city.clone(),
            category_id: business.category_id.clone(),
            subcategory_id: business.subcategory_id.clone(),
            address: business.address.clone(),
            phone: business.phone.clone(),
            website: business.website.clone(),
            href: format!("/businesses/{}", urlencoding::encode(&business.id)),
        }
    }
}

/// A matching event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHit {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub city: String,
    pub category_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub href: String,
}

impl EventHit {
    pub fn new(event: &Event, lang: Language) -> Self {
        Self {
            id: event.id.clone(),
            title: resolve(event, TextField::Title, lang).to_string(),
            description: optional_text(event, TextField::Description, lang),
            city: event.city.clone(),
            category_id: event.category_id.clone(),
            start_date: event.start_date,
            end_date: event.end_date,
            venue: event.venue.clone(),
            href: format!("/events/{}", urlencoding::encode(&event.id)),
        }
    }
}

/// A matching category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryHit {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub href: String,
}

impl CategoryHit {
    pub fn new(category: &Category, lang: Language) -> Self {
        Self {
            id: category.id.clone(),
            name: resolve(category, TextField::Name, lang).to_string(),
            description: optional_text(category, TextField::Description, lang),
            icon: category.icon.clone(),
            href: category_href(&category.id),
        }
    }
}

fn category_href(id: &str) -> String {
    format!("/categories/{}", urlencoding::encode(id))
}

/// A location offered when a search found nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackLocation {
    pub id: String,
    pub name: String,
    /// Searchable businesses in this location
    pub business_count: usize,
    /// `business_count` in the language's digits
    pub business_count_label: String,
    pub href: String,
}

impl FallbackLocation {
    pub fn new(location: &Location, business_count: usize, lang: Language) -> Self {
        Self {
            id: location.id.clone(),
            name: resolve(location, TextField::Name, lang).to_string(),
            business_count,
            business_count_label: localize_numeral(business_count, lang),
            href: format!("/locations/{}", urlencoding::encode(&location.id)),
        }
    }
}

/// A category offered when a search found nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackCategory {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub href: String,
}

impl FallbackCategory {
    pub fn new(category: &Category, lang: Language) -> Self {
        Self {
            id: category.id.clone(),
            name: resolve(category, TextField::Name, lang).to_string(),
            icon: category.icon.clone(),
            href: category_href(&category.id),
        }
    }
}

/// Alternatives shown for a zero-result search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FallbackSuggestions {
    pub locations: Vec<FallbackLocation>,
    pub categories: Vec<FallbackCategory>,
}

impl FallbackSuggestions {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.categories.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub pages: u32,
}

impl Pagination {
    /// Single page holding everything returned
    pub fn single(total: usize, limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total,
            pages: 1,
        }
    }

    pub fn paged(page: u32, limit: u32, total: usize) -> Self {
        let limit = limit.max(1);
        let pages = total.div_ceil(limit as usize).max(1);
        Self {
            page,
            limit,
            total,
            pages: u32::try_from(pages).unwrap_or(u32::MAX),
        }
    }

    /// Index range of the current page within `total` items
    pub fn window(&self) -> std::ops::Range<usize> {
        let start = (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize);
        let start = start.min(self.total);
        let end = start.saturating_add(self.limit as usize).min(self.total);
        start..end
    }
}

/// Why a collection contributed nothing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BranchError {
    Timeout,
    Unavailable,
}

impl std::fmt::Display for BranchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "Read timed out"),
            Self::Unavailable => write!(f, "Collection unavailable"),
        }
    }
}

/// A collection that degraded during a search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnresponsiveCollection {
    pub collection: Collection,
    pub error: BranchError,
}

/// Per-collection hits plus the pre-cap total
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub businesses: Vec<BusinessHit>,
    pub events: Vec<EventHit>,
    pub categories: Vec<CategoryHit>,
    pub total: usize,
    /// Only present when `total` is zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<FallbackSuggestions>,
}

/// Complete response of one global search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultSet {
    pub query: String,
    pub results: SearchResults,
    pub pagination: Pagination,
    #[serde(default)]
    pub unresponsive: Vec<UnresponsiveCollection>,
}

impl SearchResultSet {
    pub fn is_empty(&self) -> bool {
        self.results.total == 0
    }

    /// Hits actually returned, after caps and pagination
    pub fn returned(&self) -> usize {
        self.results.businesses.len() + self.results.events.len() + self.results.categories.len()
    }
}
