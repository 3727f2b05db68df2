//! Localization module
//!
//! Language negotiation, localized field resolution, native digit rendering
//! and the user-visible message catalog.

mod messages;

pub use messages::{Messages, MESSAGES};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use unic_langid::LanguageIdentifier;

/// Languages the directory carries content for.
///
/// `De` is the default: every [`LocalizedText`] has a value for it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
    Ar,
}

/// Right-to-left languages
pub const RTL_LANGUAGES: &[Language] = &[Language::Ar];

impl Language {
    pub const DEFAULT: Language = Language::De;

    /// All supported languages, default first.
    pub const ALL: [Language; 3] = [Language::De, Language::En, Language::Ar];

    pub fn code(&self) -> &'static str {
        match self {
            Self::De => "de",
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Self::De => "Deutsch",
            Self::En => "English",
            Self::Ar => "العربية",
        }
    }

    /// Look up a supported language by a BCP-47 tag (`en`, `en-GB`, `ar_SA`).
    pub fn parse(code: &str) -> Option<Self> {
        let tag = code.trim().replace('_', "-");
        let langid: LanguageIdentifier = tag.parse().ok()?;
        let base = langid.language.as_str().to_ascii_lowercase();
        Self::ALL.into_iter().find(|lang| lang.code() == base)
    }

    /// Like [`Language::parse`] but never fails: unknown codes map to the default.
    pub fn from_code(code: &str) -> Self {
        Self::parse(code).unwrap_or(Self::DEFAULT)
    }

    pub fn is_rtl(&self) -> bool {
        RTL_LANGUAGES.contains(self)
    }

    pub fn langid(&self) -> LanguageIdentifier {
        // Codes are static two-letter subtags and always parse.
        self.code().parse().unwrap_or_default()
    }

    /// The other language shown next to a label for disambiguation.
    pub fn companion(&self) -> Self {
        match self {
            Self::De => Self::En,
            Self::En | Self::Ar => Self::De,
        }
    }

    /// First ASCII-digit replacement for this language's digit system.
    fn zero_digit(&self) -> char {
        match self {
            Self::Ar => '\u{0660}',
            Self::De | Self::En => '0',
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A text attribute with a default value and optional per-language overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Default-language value, always present
    #[serde(rename = "de", alias = "default")]
    pub default: String,
    /// Overrides for the non-default languages
    #[serde(flatten)]
    pub overrides: BTreeMap<Language, String>,
}

impl LocalizedText {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            overrides: BTreeMap::new(),
        }
    }

    pub fn with(mut self, lang: Language, value: impl Into<String>) -> Self {
        if lang == Language::DEFAULT {
            self.default = value.into();
        } else {
            self.overrides.insert(lang, value.into());
        }
        self
    }

    /// Value stored for exactly this language, if any.
    pub fn get(&self, lang: Language) -> Option<&str> {
        if lang == Language::DEFAULT {
            return Some(&self.default);
        }
        self.overrides.get(&lang).map(String::as_str)
    }

    /// Value for `lang`, falling back to the default when absent or blank.
    pub fn resolve(&self, lang: Language) -> &str {
        self.get(lang)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(&self.default)
    }

    /// Default value followed by every non-blank override.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.default.as_str()).chain(
            self.overrides
                .values()
                .map(String::as_str)
                .filter(|value| !value.trim().is_empty()),
        )
    }

    /// Case-insensitive substring test against every language variant.
    ///
    /// `needle` must already be lower-cased.
    pub fn contains_folded(&self, needle: &str) -> bool {
        self.variants()
            .any(|value| value.to_lowercase().contains(needle))
    }
}

/// Localizable text fields of directory entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Title,
    Description,
}

/// Entities exposing localized fields.
pub trait Localized {
    /// The localized value of `field`, `None` if the entity has no such field.
    fn text(&self, field: TextField) -> Option<&LocalizedText>;
}

/// Resolve `field` of `entity` for `lang`, falling back to the default value.
///
/// Entities without the field resolve to an empty string.
pub fn resolve<E: Localized + ?Sized>(entity: &E, field: TextField, lang: Language) -> &str {
    entity
        .text(field)
        .map(|text| text.resolve(lang))
        .unwrap_or_default()
}

/// Render `value` with the digit glyphs of `lang`; non-digits pass through.
pub fn localize_numeral(value: impl fmt::Display, lang: Language) -> String {
    let zero = lang.zero_digit();
    value
        .to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => char::from_u32(zero as u32 + d).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Parse Accept-Language header and return best matching language
pub fn parse_accept_language(header: &str) -> Option<Language> {
    // Parse header like "en-US,en;q=0.9,de;q=0.8"
    let mut locales: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut parts = part.trim().split(';');
            let lang = parts.next()?.trim().to_string();
            if lang.is_empty() {
                return None;
            }

            let quality = parts
                .next()
                .and_then(|q| q.trim().strip_prefix("q=").and_then(|v| v.parse().ok()))
                .unwrap_or(1.0);

            Some((lang, quality))
        })
        .collect();

    // Stable sort keeps header order among equal weights
    locales.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    locales
        .into_iter()
        .find_map(|(lang, _)| Language::parse(&lang))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Place {
        name: LocalizedText,
    }

    impl Localized for Place {
        fn text(&self, field: TextField) -> Option<&LocalizedText> {
            match field {
                TextField::Name => Some(&self.name),
                _ => None,
            }
        }
    }

    fn munich() -> Place {
        Place {
            name: LocalizedText::new("München")
                .with(Language::En, "Munich")
                .with(Language::Ar, "   "),
        }
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let place = munich();
        assert_eq!(resolve(&place, TextField::Name, Language::En), "Munich");
        assert_eq!(resolve(&place, TextField::Name, Language::De), "München");
        // blank override falls back
        assert_eq!(resolve(&place, TextField::Name, Language::Ar), "München");
        // missing field
        assert_eq!(resolve(&place, TextField::Description, Language::En), "");
    }

    #[test]
    fn test_unknown_codes_use_default() {
        assert_eq!(Language::from_code("fr"), Language::De);
        assert_eq!(Language::from_code("not a tag!"), Language::De);
        assert_eq!(Language::from_code("en-GB"), Language::En);
        assert_eq!(Language::from_code("ar_SA"), Language::Ar);
    }

    #[test]
    fn test_localize_numeral() {
        assert_eq!(localize_numeral(2024, Language::Ar), "٢٠٢٤");
        assert_eq!(localize_numeral(2024, Language::De), "2024");
        assert_eq!(localize_numeral("Seite 3 von 12", Language::Ar), "Seite ٣ von ١٢");
    }

    #[test]
    fn test_contains_folded_checks_every_language() {
        let name = munich().name;
        assert!(name.contains_folded("münch"));
        assert!(name.contains_folded("muni"));
        assert!(!name.contains_folded("berlin"));
    }

    #[test]
    fn test_localized_text_yaml() {
        let text: LocalizedText =
            serde_yaml::from_str("{ de: Hausärzte, en: General practitioners }").unwrap();
        assert_eq!(text.default, "Hausärzte");
        assert_eq!(text.get(Language::En), Some("General practitioners"));
        assert_eq!(text.get(Language::Ar), None);
    }

    #[test]
    fn test_parse_accept_language() {
        let result = parse_accept_language("en-US,en;q=0.9,de;q=0.8");
        assert_eq!(result, Some(Language::En));

        let result = parse_accept_language("fr-FR,fr;q=0.9,ar;q=0.5");
        assert_eq!(result, Some(Language::Ar));

        assert_eq!(parse_accept_language("fr"), None);
    }

    #[test]
    fn test_rtl() {
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
    }
}
