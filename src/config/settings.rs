//! Settings structures for dirsearch configuration

use crate::autocomplete::Surface;
use crate::locales::Language;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main settings structure loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub suggest: SuggestSettings,
    pub data: DataSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (DIRSEARCH_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    fn merge_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("DIRSEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = var("DIRSEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("DIRSEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = var("DIRSEARCH_BASE_URL") {
            self.server.base_url = Some(val);
        }
        if let Some(val) = var("DIRSEARCH_DATA_PATH") {
            self.data.path = PathBuf::from(val);
        }
    }

    /// Default display language
    pub fn default_language(&self) -> Language {
        Language::from_code(&self.search.default_lang)
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported by /health
    pub instance_name: String,
    /// Enable metrics collection and the /stats endpoint
    pub enable_metrics: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "dirsearch".to_string(),
            enable_metrics: true,
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Base URL for the instance
    pub base_url: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8888,
            bind_address: "127.0.0.1".to_string(),
            base_url: None,
        }
    }
}

/// Global search behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Shortest accepted query, in characters
    pub min_query_length: usize,
    /// Default language code
    pub default_lang: String,
    /// Page size when a single collection is searched
    pub default_limit: u32,
    /// Largest accepted page size
    pub max_limit: u32,
    /// Fan-out timeout in seconds
    pub timeout: f64,
    /// Upper bound for caller-supplied timeouts
    pub max_timeout: f64,
    /// Hide events that already started
    pub upcoming_events_only: bool,
    /// Per-collection caps when all collections are searched
    pub caps: SearchCaps,
    /// Size of the zero-result suggestion block
    pub fallback: FallbackSettings,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_query_length: 2,
            default_lang: "de".to_string(),
            default_limit: 20,
            max_limit: 50,
            timeout: 5.0,
            max_timeout: 30.0,
            upcoming_events_only: true,
            caps: SearchCaps::default(),
            fallback: FallbackSettings::default(),
        }
    }
}

impl SearchSettings {
    /// Effective fan-out timeout for an optional caller request, in seconds
    pub fn effective_timeout(&self, requested: Option<f64>) -> Duration {
        let secs = requested
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(self.timeout)
            .min(self.max_timeout);
        Duration::from_secs_f64(secs.max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCaps {
    pub businesses: usize,
    pub events: usize,
    pub categories: usize,
}

impl Default for SearchCaps {
    fn default() -> Self {
        Self {
            businesses: 10,
            events: 5,
            categories: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackSettings {
    pub locations: usize,
    pub categories: usize,
}

impl Default for FallbackSettings {
    fn default() -> Self {
        Self {
            locations: 5,
            categories: 5,
        }
    }
}

/// Per-source suggestion limits; zero disables a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionCaps {
    pub locations: usize,
    pub categories: usize,
    pub subcategories: usize,
}

impl SuggestionCaps {
    pub const fn new(locations: usize, categories: usize, subcategories: usize) -> Self {
        Self {
            locations,
            categories,
            subcategories,
        }
    }
}

impl Default for SuggestionCaps {
    fn default() -> Self {
        Self::new(5, 3, 8)
    }
}

/// Suggestion caps for every surface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestSettings {
    pub header: SuggestionCaps,
    pub compact: SuggestionCaps,
    pub full: SuggestionCaps,
    pub category_picker: SuggestionCaps,
    pub location_filter: SuggestionCaps,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            header: SuggestionCaps::new(5, 3, 8),
            compact: SuggestionCaps::new(5, 2, 8),
            full: SuggestionCaps::new(5, 3, 8),
            category_picker: SuggestionCaps::new(0, 3, 8),
            location_filter: SuggestionCaps::new(5, 0, 0),
        }
    }
}

impl SuggestSettings {
    pub fn caps(&self, surface: Surface) -> SuggestionCaps {
        match surface {
            Surface::Header => self.header,
            Surface::Compact => self.compact,
            Surface::Full => self.full,
            Surface::CategoryPicker => self.category_picker,
            Surface::LocationFilter => self.location_filter,
        }
    }
}

/// Where the directory snapshot is read from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// YAML dataset path
    pub path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/directory.yml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8888);
        assert!(!settings.general.debug);
        assert_eq!(settings.search.min_query_length, 2);
        assert_eq!(settings.search.caps, SearchCaps::default());
        assert_eq!(settings.default_language(), Language::De);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "search:\n  min_query_length: 3\nsuggest:\n  compact:\n    categories: 1\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.search.min_query_length, 3);
        assert_eq!(settings.search.max_limit, 50);
        assert_eq!(settings.suggest.caps(Surface::Compact), SuggestionCaps::new(5, 1, 8));
        assert_eq!(settings.suggest.caps(Surface::Header), SuggestionCaps::new(5, 3, 8));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DIRSEARCH_PORT", "9000"),
            ("DIRSEARCH_DEBUG", "true"),
            ("DIRSEARCH_DATA_PATH", "/srv/directory.yml"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.merge_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(settings.server.port, 9000);
        assert!(settings.general.debug);
        assert_eq!(settings.data.path, PathBuf::from("/srv/directory.yml"));
    }

    #[test]
    fn test_effective_timeout() {
        let search = SearchSettings::default();
        assert_eq!(search.effective_timeout(None), Duration::from_secs(5));
        assert_eq!(search.effective_timeout(Some(2.5)), Duration::from_millis(2500));
        assert_eq!(search.effective_timeout(Some(600.0)), Duration::from_secs(30));
        assert_eq!(search.effective_timeout(Some(-1.0)), Duration::from_secs(5));
    }
}
