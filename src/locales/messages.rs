//! User-visible messages rendered through Fluent

use super::Language;
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::warn;

const DE: &str = r#"
query-too-short = Der Suchbegriff muss mindestens { $min } Zeichen lang sein.
search-unavailable = Die Suche ist vorübergehend nicht verfügbar.
no-results = Keine Treffer für „{ $query }“.
unknown-search-type = Unbekannter Suchtyp „{ $type }“.
"#;

const EN: &str = r#"
query-too-short = Search term must be at least { $min } characters long.
search-unavailable = Search is temporarily unavailable.
no-results = No results for "{ $query }".
unknown-search-type = Unknown search type "{ $type }".
"#;

const AR: &str = r#"
query-too-short = يجب أن يتكون مصطلح البحث من { $min } أحرف على الأقل.
search-unavailable = البحث غير متاح مؤقتًا.
no-results = لا توجد نتائج لـ "{ $query }".
unknown-search-type = نوع بحث غير معروف "{ $type }".
"#;

/// Process-wide message catalog
pub static MESSAGES: Lazy<Messages> = Lazy::new(Messages::new);

/// Fluent bundles for every supported language
pub struct Messages {
    bundles: HashMap<Language, FluentBundle<FluentResource>>,
}

impl Messages {
    pub fn new() -> Self {
        let mut bundles = HashMap::new();

        for (lang, source) in [(Language::De, DE), (Language::En, EN), (Language::Ar, AR)] {
            match Self::bundle(lang, source) {
                Some(bundle) => {
                    bundles.insert(lang, bundle);
                }
                None => warn!("Discarding broken message catalog for {}", lang),
            }
        }

        Self { bundles }
    }

    fn bundle(lang: Language, source: &str) -> Option<FluentBundle<FluentResource>> {
        let resource = FluentResource::try_new(source.to_string()).ok()?;
        let mut bundle = FluentBundle::new_concurrent(vec![lang.langid()]);
        // Messages end up in JSON bodies, not in mixed-direction markup
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).ok()?;
        Some(bundle)
    }

    /// Format message `id` in `lang`, falling back to the default language.
    ///
    /// Unknown ids are returned verbatim.
    pub fn format(&self, lang: Language, id: &str, args: Option<&FluentArgs>) -> String {
        self.format_in(lang, id, args)
            .or_else(|| self.format_in(Language::DEFAULT, id, args))
            .unwrap_or_else(|| id.to_string())
    }

    fn format_in(&self, lang: Language, id: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(&lang)?;
        let pattern = bundle.get_message(id)?.value()?;
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!("Formatting {} in {} reported {:?}", id, lang, errors);
        }
        Some(value.into_owned())
    }

    pub fn query_too_short(&self, lang: Language, min: usize) -> String {
        let mut args = FluentArgs::new();
        args.set("min", min);
        self.format(lang, "query-too-short", Some(&args))
    }

    pub fn search_unavailable(&self, lang: Language) -> String {
        self.format(lang, "search-unavailable", None)
    }

    pub fn no_results(&self, lang: Language, query: &str) -> String {
        let mut args = FluentArgs::new();
        args.set("query", query.to_string());
        self.format(lang, "no-results", Some(&args))
    }

    pub fn unknown_search_type(&self, lang: Language, name: &str) -> String {
        let mut args = FluentArgs::new();
        args.set("type", name.to_string());
        self.format(lang, "unknown-search-type", Some(&args))
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_per_language() {
        let messages = Messages::new();
        assert_eq!(
            messages.query_too_short(Language::En, 2),
            "Search term must be at least 2 characters long."
        );
        assert!(messages.query_too_short(Language::De, 2).contains("mindestens 2"));
        assert!(messages.query_too_short(Language::Ar, 2).contains('2'));
    }

    #[test]
    fn test_unknown_message_id() {
        assert_eq!(MESSAGES.format(Language::En, "missing-id", None), "missing-id");
    }
}
