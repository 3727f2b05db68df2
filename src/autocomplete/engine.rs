//! Suggestion building over the reference catalog

use super::suggestion::Suggestion;
use crate::config::SuggestionCaps;
use crate::locales::Language;
use crate::matching::{Needle, NAME_FIELDS};
use crate::models::{Catalog, Category};
use std::sync::Arc;

/// The one suggestion builder every surface goes through
#[derive(Debug, Clone, Default)]
pub struct SuggestionEngine {
    catalog: Arc<Catalog>,
}

impl SuggestionEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Engine over an empty catalog; every query yields nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn active_categories(&self) -> impl Iterator<Item = &Category> {
        self.catalog.categories().iter().filter(|c| c.is_active)
    }

    /// Capped matches for `query`: locations, then categories, then subcategories.
    ///
    /// Subcategories are collected across all active categories whether or
    /// not their owner matched.
    pub fn build(&self, query: &str, lang: Language, caps: &SuggestionCaps) -> Vec<Suggestion> {
        let Some(needle) = Needle::new(query) else {
            return Vec::new();
        };

        let locations = self
            .catalog
            .locations()
            .iter()
            .filter(|location| needle.matches(*location, NAME_FIELDS))
            .take(caps.locations)
            .map(|location| Suggestion::location(location, lang));

        let categories = self
            .active_categories()
            .filter(|category| needle.matches(*category, NAME_FIELDS))
            .take(caps.categories)
            .map(|category| Suggestion::category(category, lang));

        let subcategories = self
            .active_categories()
            .flat_map(|category| category.subcategories.iter().map(move |sub| (sub, category)))
            .filter(|(sub, _)| needle.matches(*sub, NAME_FIELDS))
            .take(caps.subcategories)
            .map(|(sub, owner)| Suggestion::subcategory(sub, owner, lang));

        locations.chain(categories).chain(subcategories).collect()
    }

    /// Every enabled entity, uncapped, sorted by lower-cased default name.
    pub fn build_all(&self, lang: Language, caps: &SuggestionCaps) -> Vec<Suggestion> {
        let mut keyed: Vec<(String, Suggestion)> = Vec::new();

        if caps.locations > 0 {
            keyed.extend(self.catalog.locations().iter().map(|location| {
                (
                    location.name.default.to_lowercase(),
                    Suggestion::location(location, lang),
                )
            }));
        }

        if caps.categories > 0 {
            keyed.extend(self.active_categories().map(|category| {
                (
                    category.name.default.to_lowercase(),
                    Suggestion::category(category, lang),
                )
            }));
        }

        if caps.subcategories > 0 {
            for category in self.active_categories() {
                keyed.extend(category.subcategories.iter().map(|sub| {
                    (
                        sub.name.default.to_lowercase(),
                        Suggestion::subcategory(sub, category, lang),
                    )
                }));
            }
        }

        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        keyed.into_iter().map(|(_, suggestion)| suggestion).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::{NavigationTarget, SuggestionKind};
    use crate::config::SuggestSettings;
    use crate::store::{testdata, RecordStore};
    use std::collections::HashSet;

    async fn engine() -> SuggestionEngine {
        let catalog = testdata::store().catalog().await.unwrap();
        SuggestionEngine::new(Arc::new(catalog))
    }

    fn count(suggestions: &[Suggestion], kind: SuggestionKind) -> usize {
        suggestions.iter().filter(|s| s.kind() == kind).count()
    }

    #[tokio::test]
    async fn test_location_suggestion_for_prefix() {
        let engine = engine().await;
        let caps = SuggestSettings::default().header;
        let suggestions = engine.build("Berl", Language::De, &caps);

        assert!(suggestions
            .iter()
            .any(|s| s.kind() == SuggestionKind::Location && s.label() == "Berlin"));
    }

    #[tokio::test]
    async fn test_subcategory_in_secondary_language() {
        let engine = engine().await;
        let caps = SuggestSettings::default().header;
        let suggestions = engine.build("Haus", Language::En, &caps);

        let sub = suggestions
            .iter()
            .find(|s| s.kind() == SuggestionKind::Subcategory)
            .expect("subcategory suggestion");
        assert_eq!(sub.label(), "General practitioners");
        assert_eq!(sub.alt_label(), Some("Hausärzte"));
        match sub {
            Suggestion::Subcategory { category_label, .. } => assert_eq!(category_label, "Doctors"),
            other => panic!("unexpected {other:?}"),
        }
        // the owning category itself does not match "Haus"
        assert_eq!(count(&suggestions, SuggestionKind::Category), 0);
    }

    #[tokio::test]
    async fn test_caps_and_type_order() {
        let engine = engine().await;
        let caps = SuggestSettings::default().header;
        let suggestions = engine.build("e", Language::De, &caps);

        assert_eq!(count(&suggestions, SuggestionKind::Location), caps.locations);
        assert_eq!(count(&suggestions, SuggestionKind::Category), caps.categories);
        assert_eq!(count(&suggestions, SuggestionKind::Subcategory), caps.subcategories);

        let kinds: Vec<_> = suggestions.iter().map(Suggestion::kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort_by_key(|kind| *kind as u8);
        assert_eq!(kinds, sorted);

        // first five matching locations in source order
        let ids: Vec<_> = suggestions.iter().take(5).map(Suggestion::id).collect();
        assert_eq!(ids, ["berlin", "muenchen", "koeln", "duesseldorf", "leipzig"]);
    }

    #[tokio::test]
    async fn test_subcategories_match_own_fields_only() {
        let engine = engine().await;
        let caps = SuggestSettings::default().full;
        let suggestions = engine.build("Doctors", Language::En, &caps);
        assert_eq!(count(&suggestions, SuggestionKind::Category), 1);
        assert_eq!(count(&suggestions, SuggestionKind::Subcategory), 0);
    }

    #[tokio::test]
    async fn test_surface_disables_sources() {
        let engine = engine().await;
        let picker = SuggestSettings::default().category_picker;
        let suggestions = engine.build("e", Language::De, &picker);
        assert_eq!(count(&suggestions, SuggestionKind::Location), 0);
        assert!(count(&suggestions, SuggestionKind::Subcategory) > 0);

        let filter = SuggestSettings::default().location_filter;
        let suggestions = engine.build("e", Language::De, &filter);
        assert!(suggestions.iter().all(|s| s.kind() == SuggestionKind::Location));
    }

    #[tokio::test]
    async fn test_inactive_categories_hidden() {
        let engine = engine().await;
        let caps = SuggestSettings::default().full;
        assert!(engine.build("Reise", Language::De, &caps).is_empty());
        assert!(engine.build("Pauschal", Language::De, &caps).is_empty());
    }

    #[tokio::test]
    async fn test_language_changes_labels_not_targets() {
        let engine = engine().await;
        let caps = SuggestSettings::default().header;
        let de = engine.build("ä", Language::De, &caps);
        let en = engine.build("ä", Language::En, &caps);

        assert_eq!(de.len(), en.len());
        for (a, b) in de.iter().zip(&en) {
            assert_eq!(a.target(), b.target());
        }
        assert!(de.iter().zip(&en).any(|(a, b)| a.label() != b.label()));
    }

    #[tokio::test]
    async fn test_browse_all_lists_everything_sorted() {
        let engine = engine().await;
        let caps = SuggestSettings::default().header;
        let all = engine.build_all(Language::En, &caps);

        let catalog = engine.catalog();
        let active: Vec<_> = catalog.categories().iter().filter(|c| c.is_active).collect();
        let expected = catalog.locations().len()
            + active.len()
            + active.iter().map(|c| c.subcategories.len()).sum::<usize>();
        assert_eq!(all.len(), expected);

        let targets: HashSet<&NavigationTarget> = all.iter().map(Suggestion::target).collect();
        assert_eq!(targets.len(), all.len());

        // sorted by the default-language name, not the displayed one
        let keys: Vec<String> = all
            .iter()
            .map(|s| default_name(catalog, s.target()).to_lowercase())
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    fn default_name<'a>(catalog: &'a Catalog, target: &NavigationTarget) -> &'a str {
        match target {
            NavigationTarget::Location { location_id } => catalog
                .locations()
                .iter()
                .find(|l| &l.id == location_id)
                .map(|l| l.name.default.as_str())
                .unwrap(),
            NavigationTarget::Category { category_id } => {
                &catalog.category(category_id).unwrap().name.default
            }
            NavigationTarget::Subcategory {
                category_id,
                subcategory_id,
            } => catalog
                .category(category_id)
                .unwrap()
                .subcategories
                .iter()
                .find(|s| &s.id == subcategory_id)
                .map(|s| s.name.default.as_str())
                .unwrap(),
        }
    }

    #[test]
    fn test_blank_query_and_empty_catalog() {
        let caps = SuggestSettings::default().header;
        assert!(SuggestionEngine::empty().build("Berl", Language::De, &caps).is_empty());
        assert!(SuggestionEngine::empty().build_all(Language::De, &caps).is_empty());
    }
}
