//! Locale discovery, validation and closest-match resolution.

use tracing::{debug, warn};

use crate::host::LocaleHost;
use crate::locale::Locale;
use crate::registry::LocaleSet;

/// Locales probed by discovery when no explicit candidate list is configured.
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "en-US", "en-GB", "en-AU", "en-CA", "en-IN", "en-IE", "en-NZ", "ar-EG", "ar-SA", "bg-BG",
    "ca-ES", "cs-CZ", "da-DK", "de-DE", "de-AT", "de-CH", "el-GR", "es-ES", "es-MX", "es-US",
    "fi-FI", "fr-FR", "fr-BE", "fr-CA", "fr-CH", "he-IL", "hi-IN", "hu-HU", "id-ID", "it-IT",
    "it-CH", "ja-JP", "ko-KR", "nb-NO", "nl-NL", "nl-BE", "pl-PL", "pt-BR", "pt-PT", "ro-RO",
    "ru-RU", "sv-SE", "th-TH", "tr-TR", "uk-UA", "vi-VN", "zh-CN", "zh-TW", "zh-HK",
];

/// Outcome of looking up one string resource under one locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The locale (or its language) carries its own entry for the key.
    Translated(String),
    /// No entry for this locale; the value was inherited from the default locale.
    Fallback(String),
    /// The key does not exist at all.
    Missing,
}

impl Lookup {
    pub fn is_translated(&self) -> bool {
        matches!(self, Lookup::Translated(_))
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Lookup::Translated(v) | Lookup::Fallback(v) => Some(v),
            Lookup::Missing => None,
        }
    }
}

/// String-resource store keyed by locale.
///
/// Implementations must report inherited values as [`Lookup::Fallback`]:
/// discovery relies on that distinction to avoid listing locales that merely
/// fall back to the default strings.
pub trait ResourceLookup {
    /// The locale the app ships as its default/fallback.
    fn default_locale(&self) -> Locale;

    fn lookup(&self, key: &str, locale: &Locale) -> Lookup;

    /// Whether resources can be resolved for `locale` at all.
    fn is_resolvable(&self, locale: &Locale) -> bool;
}

impl<R: ResourceLookup + ?Sized> ResourceLookup for &R {
    fn default_locale(&self) -> Locale {
        (**self).default_locale()
    }

    fn lookup(&self, key: &str, locale: &Locale) -> Lookup {
        (**self).lookup(key, locale)
    }

    fn is_resolvable(&self, locale: &Locale) -> bool {
        (**self).is_resolvable(locale)
    }
}

pub struct LocaleDetector<R> {
    resources: R,
    candidates: Vec<Locale>,
}

impl<R: ResourceLookup> LocaleDetector<R> {
    /// Detector probing [`DEFAULT_CANDIDATES`].
    pub fn new(resources: R) -> Self {
        Self::with_candidates(resources, Vec::new())
    }

    /// Detector probing `candidates`; an empty list means [`DEFAULT_CANDIDATES`].
    pub fn with_candidates(resources: R, candidates: Vec<Locale>) -> Self {
        let candidates = if candidates.is_empty() {
            DEFAULT_CANDIDATES
                .iter()
                .filter_map(|tag| Locale::parse(tag).ok())
                .collect()
        } else {
            candidates
        };
        Self {
            resources,
            candidates,
        }
    }

    pub fn resources(&self) -> &R {
        &self.resources
    }

    pub fn candidates(&self) -> &[Locale] {
        &self.candidates
    }

    /// Locales that carry their own translation of `resource_key`.
    ///
    /// The default locale is probed first and is included when it has the
    /// key. Candidates whose lookup falls back to the default strings are
    /// left out.
    pub fn fetch_available_locales(&self, resource_key: &str) -> LocaleSet {
        let default = self.resources.default_locale();
        let mut available = LocaleSet::new();

        if !self.resources.lookup(resource_key, &default).is_translated() {
            warn!(
                key = %resource_key,
                locale = %default,
                "Resource key missing from the default locale; nothing to discover"
            );
            return available;
        }
        available.insert(default);

        for candidate in &self.candidates {
            if available.contains(candidate) {
                continue;
            }
            if self.resources.lookup(resource_key, candidate).is_translated() {
                available.insert(candidate.clone());
            }
        }

        debug!(
            key = %resource_key,
            count = available.len(),
            "Discovered available locales"
        );
        available
    }

    /// Keep only the locales the resource store can resolve, in input order.
    ///
    /// Duplicates and unresolvable entries are dropped, never reported as
    /// errors. Validating an already validated set returns it unchanged.
    pub fn validate_locales<I>(&self, candidates: I) -> LocaleSet
    where
        I: IntoIterator<Item = Locale>,
    {
        let mut valid = LocaleSet::new();
        for locale in candidates {
            if !self.resources.is_resolvable(&locale) {
                debug!(locale = %locale, "Dropping unresolvable locale");
                continue;
            }
            valid.insert(locale);
        }
        valid
    }

    /// The live device locale. Never cached.
    pub fn current_locale<H: LocaleHost + ?Sized>(&self, host: &H) -> Locale {
        host.device_locale()
    }

    /// Best partial match for `target` in `supported`.
    ///
    /// An exact match wins; otherwise the first locale sharing the target's
    /// language. Returns `None` when no language matches.
    pub fn detect_closest_locale(&self, supported: &LocaleSet, target: &Locale) -> Option<usize> {
        supported.get_index_of(target).or_else(|| {
            supported
                .iter()
                .position(|locale| locale.same_language(target))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogResources;
    use pretty_assertions::assert_eq;

    fn loc(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn set(tags: &[&str]) -> LocaleSet {
        tags.iter().map(|t| loc(t)).collect()
    }

    fn tags(set: &LocaleSet) -> Vec<String> {
        set.iter().map(Locale::tag).collect()
    }

    fn resources() -> CatalogResources {
        let mut res = CatalogResources::new(loc("en-US"));
        res.insert(&loc("en-US"), "app_name", "Switcher");
        res.insert(&loc("fr-FR"), "app_name", "Sélecteur");
        res.insert(&loc("de"), "app_name", "Umschalter");
        // Translated, but the text happens to equal the default.
        res.insert(&loc("en-GB"), "app_name", "Switcher");
        // Has other strings, but not app_name.
        res.insert(&loc("ja-JP"), "greeting", "こんにちは");
        res
    }

    #[test]
    fn fetch_skips_silent_fallbacks() {
        let detector = LocaleDetector::with_candidates(
            resources(),
            vec![loc("en-GB"), loc("fr-FR"), loc("de-AT"), loc("ja-JP"), loc("es-ES")],
        );
        let found = detector.fetch_available_locales("app_name");
        assert_eq!(tags(&found), vec!["en-US", "en-GB", "fr-FR", "de-AT"]);
    }

    #[test]
    fn fetch_without_default_entry_is_empty() {
        let detector = LocaleDetector::new(resources());
        assert!(detector.fetch_available_locales("greeting").is_empty());
        assert!(detector.fetch_available_locales("nope").is_empty());
    }

    #[test]
    fn default_candidates_are_used_when_none_given() {
        let detector = LocaleDetector::new(resources());
        assert_eq!(detector.candidates().len(), DEFAULT_CANDIDATES.len());

        let found = detector.fetch_available_locales("app_name");
        assert_eq!(found.get_index(0), Some(&loc("en-US")));
        assert!(found.contains(&loc("de-CH")));
        assert!(!found.contains(&loc("ja-JP")));
    }

    #[test]
    fn validate_drops_unresolvable_and_is_idempotent() {
        let detector = LocaleDetector::new(resources());
        let once = detector.validate_locales(vec![
            loc("fr-FR"),
            loc("xx-YY"),
            loc("en-US"),
            loc("fr-FR"),
            loc("de-DE"),
        ]);
        assert_eq!(tags(&once), vec!["fr-FR", "en-US", "de-DE"]);

        let twice = detector.validate_locales(once.clone());
        assert_eq!(tags(&twice), tags(&once));
    }

    #[test]
    fn closest_prefers_exact_then_first_same_language() {
        let detector = LocaleDetector::new(resources());
        let supported = set(&["fr-FR", "en-GB", "en-US"]);

        assert_eq!(detector.detect_closest_locale(&supported, &loc("en-US")), Some(2));
        assert_eq!(detector.detect_closest_locale(&supported, &loc("en-AU")), Some(1));
        assert_eq!(detector.detect_closest_locale(&supported, &loc("fr-CA")), Some(0));
        assert_eq!(detector.detect_closest_locale(&supported, &loc("de-DE")), None);
        assert_eq!(detector.detect_closest_locale(&LocaleSet::new(), &loc("en-US")), None);
    }
}
