//! Suggestion and navigation target types

use crate::locales::{Language, LocalizedText};
use crate::models::{Category, Location, Subcategory};
use serde::{Deserialize, Serialize};

/// Where committing a suggestion navigates to.
///
/// Built from identifiers only, so it is the same in every language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationTarget {
    Location {
        location_id: String,
    },
    Category {
        category_id: String,
    },
    Subcategory {
        category_id: String,
        subcategory_id: String,
    },
}

impl NavigationTarget {
    pub fn href(&self) -> String {
        match self {
            Self::Location { location_id } => {
                format!("/locations/{}", urlencoding::encode(location_id))
            }
            Self::Category { category_id } => {
                format!("/categories/{}", urlencoding::encode(category_id))
            }
            Self::Subcategory {
                category_id,
                subcategory_id,
            } => format!(
                "/categories/{}/{}",
                urlencoding::encode(category_id),
                urlencoding::encode(subcategory_id)
            ),
        }
    }
}

/// Source type of a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Location,
    Category,
    Subcategory,
}

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suggestion {
    Location {
        id: String,
        label: String,
        alt_label: Option<String>,
        target: NavigationTarget,
    },
    Category {
        id: String,
        label: String,
        alt_label: Option<String>,
        icon: Option<String>,
        target: NavigationTarget,
    },
    Subcategory {
        id: String,
        label: String,
        alt_label: Option<String>,
        /// Owning category, in the same language as `label`
        category_label: String,
        target: NavigationTarget,
    },
}

/// The companion-language variant of `text`, when it differs from the label.
fn alt_label(text: &LocalizedText, lang: Language) -> Option<String> {
    let label = text.resolve(lang);
    text.get(lang.companion())
        .filter(|alt| !alt.trim().is_empty() && *alt != label)
        .map(str::to_string)
}

impl Suggestion {
    pub fn location(location: &Location, lang: Language) -> Self {
        Self::Location {
            id: location.id.clone(),
            label: location.name.resolve(lang).to_string(),
            alt_label: alt_label(&location.name, lang),
            target: NavigationTarget::Location {
                location_id: location.id.clone(),
            },
        }
    }

    pub fn category(category: &Category, lang: Language) -> Self {
        Self::Category {
            id: category.id.clone(),
            label: category.name.resolve(lang).to_string(),
            alt_label: alt_label(&category.name, lang),
            icon: category.icon.clone(),
            target: NavigationTarget::Category {
                category_id: category.id.clone(),
            },
        }
    }

    pub fn subcategory(sub: &Subcategory, owner: &Category, lang: Language) -> Self {
        Self::Subcategory {
            id: sub.id.clone(),
            label: sub.name.resolve(lang).to_string(),
            alt_label: alt_label(&sub.name, lang),
            category_label: owner.name.resolve(lang).to_string(),
            target: NavigationTarget::Subcategory {
                category_id: owner.id.clone(),
                subcategory_id: sub.id.clone(),
            },
        }
    }

    pub fn kind(&self) -> SuggestionKind {
        match self {
            Self::Location { .. } => SuggestionKind::Location,
            Self::Category { .. } => SuggestionKind::Category,
            Self::Subcategory { .. } => SuggestionKind::Subcategory,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Location { id, .. } | Self::Category { id, .. } | Self::Subcategory { id, .. } => {
                id
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Location { label, .. }
            | Self::Category { label, .. }
            | Self::Subcategory { label, .. } => label,
        }
    }

    pub fn alt_label(&self) -> Option<&str> {
        match self {
            Self::Location { alt_label, .. }
            | Self::Category { alt_label, .. }
            | Self::Subcategory { alt_label, .. } => alt_label.as_deref(),
        }
    }

    pub fn target(&self) -> &NavigationTarget {
        match self {
            Self::Location { target, .. }
            | Self::Category { target, .. }
            | Self::Subcategory { target, .. } => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href_encoding() {
        let target = NavigationTarget::Subcategory {
            category_id: "recht".to_string(),
            subcategory_id: "familien recht".to_string(),
        };
        assert_eq!(target.href(), "/categories/recht/familien%20recht");
    }

    #[test]
    fn test_alt_label_uses_companion_language() {
        let location = Location {
            id: "muenchen".to_string(),
            name: LocalizedText::new("München").with(Language::En, "Munich"),
        };

        let de = Suggestion::location(&location, Language::De);
        assert_eq!(de.label(), "München");
        assert_eq!(de.alt_label(), Some("Munich"));

        let en = Suggestion::location(&location, Language::En);
        assert_eq!(en.label(), "Munich");
        assert_eq!(en.alt_label(), Some("München"));

        // no override: the Arabic label falls back and the companion is identical
        let ar = Suggestion::location(&location, Language::Ar);
        assert_eq!(ar.label(), "München");
        assert_eq!(ar.alt_label(), None);
    }
}
