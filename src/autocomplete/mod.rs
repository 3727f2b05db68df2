//! Autocomplete for the directory search box
//!
//! Locations, categories and subcategories are matched by one engine and
//! merged into a single dropdown. Each UI surface only differs in its caps.

mod engine;
mod state;
mod suggestion;

pub use engine::SuggestionEngine;
pub use state::{Autocomplete, Commit, Dropdown, InputEvent, Interaction, Transition};
pub use suggestion::{NavigationTarget, Suggestion, SuggestionKind};

use serde::{Deserialize, Serialize};

/// Places the dropdown is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Site header search box
    #[default]
    Header,
    /// Narrow search box on listing pages
    Compact,
    /// Search page
    Full,
    /// Category selection in the upload and registration wizards
    CategoryPicker,
    /// City filter on result pages
    LocationFilter,
}

impl Surface {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace('-', "_").as_str() {
            "header" => Some(Self::Header),
            "compact" => Some(Self::Compact),
            "full" => Some(Self::Full),
            "category_picker" => Some(Self::CategoryPicker),
            "location_filter" => Some(Self::LocationFilter),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_names() {
        assert_eq!(Surface::parse("header"), Some(Surface::Header));
        assert_eq!(Surface::parse("category-picker"), Some(Surface::CategoryPicker));
        assert_eq!(Surface::parse("Location_Filter"), Some(Surface::LocationFilter));
        assert_eq!(Surface::parse("sidebar"), None);
    }
}
