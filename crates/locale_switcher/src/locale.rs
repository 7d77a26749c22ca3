use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::LocaleError;

/// Pseudo-locales used to stress-test layouts without real translations.
///
/// - `en-XA`: accented, expanded left-to-right text
/// - `ar-XB`: mirrored right-to-left text
const PSEUDO_LOCALES: [(&str, &str); 2] = [("en", "XA"), ("ar", "XB")];

/// Normalize locale identifiers to a canonical-ish form for parsing.
///
/// - Strips encoding and modifier suffixes (`en_US.UTF-8`, `de_DE@euro`).
/// - Converts `_` to `-` (Android and POSIX report `en_US`).
/// - Trims whitespace.
pub fn normalize_locale(s: &str) -> String {
    let s = s.trim();
    let s = s.split_once('.').map_or(s, |(part, _)| part);
    let s = s.split_once('@').map_or(s, |(part, _)| part);
    s.trim().replace('_', "-")
}

/// The fixed pseudo-locale pair (LTR first, then RTL).
pub fn pseudo_locales() -> [Locale; 2] {
    PSEUDO_LOCALES.map(|(language, country)| Locale::new(language, country))
}

/// A language + country pair.
///
/// Language is stored lowercase and country uppercase, so `EN-us` and `en_US`
/// compare equal. Country may be empty for language-only locales.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    country: String,
}

impl Locale {
    /// Build a locale from already-split parts. Only case is normalized.
    pub fn new(language: &str, country: &str) -> Self {
        Self {
            language: language.trim().to_ascii_lowercase(),
            country: country.trim().to_ascii_uppercase(),
        }
    }

    /// Parse a locale tag such as `en-US`, `en_US.UTF-8` or `fr`.
    ///
    /// Script and variant subtags are accepted but not kept: `zh-Hans-CN`
    /// becomes `zh-CN`.
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let normalized = normalize_locale(tag);
        if normalized.is_empty() || normalized == "C" || normalized == "POSIX" {
            return Err(LocaleError::InvalidTag {
                tag: tag.to_string(),
                reason: "no language subtag".to_string(),
            });
        }

        let langid = normalized
            .parse::<LanguageIdentifier>()
            .map_err(|e| LocaleError::InvalidTag {
                tag: tag.to_string(),
                reason: e.to_string(),
            })?;

        let language = langid.language.to_string();
        if language == "und" {
            return Err(LocaleError::InvalidTag {
                tag: tag.to_string(),
                reason: "undetermined language".to_string(),
            });
        }
        let country = langid
            .region
            .map(|region| region.to_string())
            .unwrap_or_default();

        Ok(Self::new(&language, &country))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn has_country(&self) -> bool {
        !self.country.is_empty()
    }

    pub fn same_language(&self, other: &Locale) -> bool {
        self.language == other.language
    }

    /// The language-only parent (`fr-CA` -> `fr`), or `None` if this locale
    /// has no country.
    pub fn language_only(&self) -> Option<Locale> {
        self.has_country().then(|| Locale::new(&self.language, ""))
    }

    pub fn is_pseudo(&self) -> bool {
        PSEUDO_LOCALES
            .iter()
            .any(|&(language, country)| self.language == language && self.country == country)
    }

    /// BCP-47 style tag (`en-US`, `fr`).
    pub fn tag(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.country.is_empty() {
            f.write_str(&self.language)
        } else {
            write!(f, "{}-{}", self.language, self.country)
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Locale::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}
