//! Search request and related data models

use crate::locales::Language;
use crate::store::Collection;
use serde::{Deserialize, Serialize};

/// Which collections a search covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    All,
    Businesses,
    Events,
    Categories,
}

impl SearchType {
    /// Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "" | "all" => Some(Self::All),
            "businesses" | "business" => Some(Self::Businesses),
            "events" | "event" => Some(Self::Events),
            "categories" | "category" => Some(Self::Categories),
            _ => None,
        }
    }

    pub fn includes(&self, collection: Collection) -> bool {
        match self {
            Self::All => true,
            Self::Businesses => collection == Collection::Businesses,
            Self::Events => collection == Collection::Events,
            Self::Categories => collection == Collection::Categories,
        }
    }

    /// The single collection searched, `None` for `All`
    pub fn collection(&self) -> Option<Collection> {
        match self {
            Self::All => None,
            Self::Businesses => Some(Collection::Businesses),
            Self::Events => Some(Collection::Events),
            Self::Categories => Some(Collection::Categories),
        }
    }
}

/// Complete global search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Raw query text
    pub query: String,
    pub search_type: SearchType,
    /// Case-insensitive substring of the record's city
    pub city: Option<String>,
    /// Category or subcategory id
    pub category: Option<String>,
    /// Page number (1-indexed), single-collection searches only
    pub page: u32,
    /// Page size, defaults to `search.default_limit`
    pub limit: Option<u32>,
    /// Display language of the results
    pub lang: Language,
    /// Custom timeout in seconds
    pub timeout_limit: Option<f64>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_type: SearchType::All,
            city: None,
            category: None,
            page: 1,
            limit: None,
            lang: Language::DEFAULT,
            timeout_limit: None,
        }
    }

    pub fn with_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    /// Blank values clear the filter.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into()).filter(|c| !c.trim().is_empty());
        self
    }

    /// Blank values clear the filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into()).filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_lang(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_limit = Some(seconds);
        self
    }

    /// Page size clamped to `1..=max`
    pub fn effective_limit(&self, default: u32, max: u32) -> u32 {
        self.limit.unwrap_or(default).clamp(1, max.max(1))
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }
}
