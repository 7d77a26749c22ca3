use std::collections::HashMap;

use crate::detector::{Lookup, ResourceLookup};
use crate::locale::Locale;

/// Flat key -> string table for one locale.
#[derive(Clone, Debug, Default)]
pub struct StringCatalog {
    entries: HashMap<String, String>,
}

impl StringCatalog {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StringCatalog {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut cat = Self::new();
        for (k, v) in iter {
            cat.insert(k, v);
        }
        cat
    }
}

/// In-memory string resources, one catalog per locale.
///
/// Lookup order for a locale is: the locale itself, then its language-only
/// parent (`fr-CA` -> `fr`). Anything resolved there is a real translation.
/// Only when both miss does the default locale's catalog answer, and that
/// answer is reported as [`Lookup::Fallback`].
#[derive(Clone, Debug)]
pub struct CatalogResources {
    default_locale: Locale,
    catalogs: HashMap<Locale, StringCatalog>,
}

impl CatalogResources {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            catalogs: HashMap::new(),
        }
    }

    /// Add or replace the whole catalog for `locale`.
    pub fn add_catalog(&mut self, locale: Locale, catalog: StringCatalog) {
        self.catalogs.insert(locale, catalog);
    }

    pub fn insert(&mut self, locale: &Locale, key: impl Into<String>, value: impl Into<String>) {
        self.catalogs
            .entry(locale.clone())
            .or_default()
            .insert(key, value);
    }

    pub fn has_catalog(&self, locale: &Locale) -> bool {
        self.catalogs.contains_key(locale)
    }

    /// Resolved string for `key`, fallback included.
    pub fn get(&self, key: &str, locale: &Locale) -> Option<String> {
        self.lookup(key, locale).value().map(str::to_string)
    }

    fn own_entry(&self, key: &str, locale: &Locale) -> Option<&str> {
        let parent = locale.language_only();
        std::iter::once(locale)
            .chain(parent.as_ref())
            .find_map(|l| self.catalogs.get(l).and_then(|cat| cat.get(key)))
    }
}

impl ResourceLookup for CatalogResources {
    fn default_locale(&self) -> Locale {
        self.default_locale.clone()
    }

    fn lookup(&self, key: &str, locale: &Locale) -> Lookup {
        if let Some(value) = self.own_entry(key, locale) {
            return Lookup::Translated(value.to_string());
        }
        match self.own_entry(key, &self.default_locale) {
            Some(value) => Lookup::Fallback(value.to_string()),
            None => Lookup::Missing,
        }
    }

    fn is_resolvable(&self, locale: &Locale) -> bool {
        *locale == self.default_locale
            || self.has_catalog(locale)
            || locale
                .language_only()
                .is_some_and(|parent| self.has_catalog(&parent))
    }
}
