//! Suggestions offered when a search matches nothing

use crate::config::FallbackSettings;
use crate::locales::Language;
use crate::models::{Business, Category, Location};
use crate::results::{FallbackCategory, FallbackLocation, FallbackSuggestions};
use std::cmp::Reverse;

/// Whether `business` is attached to `location`.
///
/// The location id decides when present; otherwise the city must equal
/// one of the location's names in any language.
fn belongs_to(business: &Business, location: &Location) -> bool {
    match &business.location_id {
        Some(id) => id == &location.id,
        None => {
            let city = business.city.trim().to_lowercase();
            location
                .name
                .variants()
                .any(|name| name.trim().to_lowercase() == city)
        }
    }
}

/// Top locations by searchable business count, then top active categories
/// by sort order. Ties keep source order.
pub fn fallback_suggestions(
    locations: &[Location],
    categories: &[Category],
    businesses: &[Business],
    limits: &FallbackSettings,
    lang: Language,
) -> FallbackSuggestions {
    let searchable: Vec<&Business> = businesses.iter().filter(|b| b.is_searchable()).collect();

    let mut counted: Vec<(&Location, usize)> = locations
        .iter()
        .map(|location| {
            let count = searchable
                .iter()
                .filter(|business| belongs_to(business, location))
                .count();
            (location, count)
        })
        .collect();
    counted.sort_by_key(|(_, count)| Reverse(*count));

    let mut active: Vec<&Category> = categories.iter().filter(|c| c.is_active).collect();
    active.sort_by_key(|category| category.sort_order);

    FallbackSuggestions {
        locations: counted
            .into_iter()
            .take(limits.locations)
            .map(|(location, count)| FallbackLocation::new(location, count, lang))
            .collect(),
        categories: active
            .into_iter()
            .take(limits.categories)
            .map(|category| FallbackCategory::new(category, lang))
            .collect(),
    }
}
