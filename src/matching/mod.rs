//! Entity matching
//!
//! One matcher shared by the suggestion dropdown and the global search:
//! an entity matches when the case-folded query is a substring of any
//! language variant of any of the inspected fields. Results keep source
//! order; there is no scoring.

use crate::locales::{Localized, TextField};

/// Fields inspected by the suggestion dropdown
pub const NAME_FIELDS: &[TextField] = &[TextField::Name];

/// Fields inspected by the global search
pub const RECORD_FIELDS: &[TextField] = &[TextField::Name, TextField::Title, TextField::Description];

/// A trimmed, case-folded query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle {
    folded: String,
}

impl Needle {
    /// `None` for blank queries.
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            folded: trimmed.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Length in characters, not bytes
    pub fn len(&self) -> usize {
        self.folded.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Whether any language variant of `fields` on `entity` contains the needle.
    pub fn matches<E: Localized + ?Sized>(&self, entity: &E, fields: &[TextField]) -> bool {
        fields
            .iter()
            .filter_map(|field| entity.text(*field))
            .any(|text| text.contains_folded(&self.folded))
    }
}

/// Entities of `items` matching `query`, in source order.
///
/// A blank query matches nothing.
pub fn match_entities<'a, E: Localized>(
    items: &'a [E],
    query: &str,
    fields: &[TextField],
) -> Vec<&'a E> {
    let Some(needle) = Needle::new(query) else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| needle.matches(*item, fields))
        .collect()
}
