//! Global search errors

use crate::locales::{Language, MESSAGES};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The trimmed query is shorter than the configured minimum.
    #[error("query too short: {actual} characters, at least {min} required")]
    QueryTooShort { min: usize, actual: usize },
    /// The store is offline or every queried collection failed.
    #[error("search unavailable: {0}")]
    Unavailable(String),
}

impl SearchError {
    /// Message shown to the user, in `lang`
    pub fn user_message(&self, lang: Language) -> String {
        match self {
            Self::QueryTooShort { min, .. } => MESSAGES.query_too_short(lang, *min),
            Self::Unavailable(_) => MESSAGES.search_unavailable(lang),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_localized() {
        let err = SearchError::QueryTooShort { min: 2, actual: 1 };
        assert_eq!(
            err.user_message(Language::En),
            "Search term must be at least 2 characters long."
        );
        assert_ne!(err.user_message(Language::De), err.user_message(Language::En));
        assert!(err.to_string().contains("at least 2"));
    }
}
