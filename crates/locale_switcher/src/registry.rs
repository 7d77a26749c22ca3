use indexmap::IndexSet;
use tracing::debug;

use crate::display::display_name;
use crate::locale::{pseudo_locales, Locale};

/// Ordered set of supported locales. Insertion order is the positional order.
pub type LocaleSet = IndexSet<Locale>;

/// The active supported locale set plus the fixed pseudo-locale pair.
///
/// The set is only ever replaced wholesale; there is no per-locale insert or
/// remove. Validation happens before [`LocaleRegistry::replace`] is called
/// (see [`crate::LocaleSwitcher::set_supported_locales`]).
#[derive(Clone, Debug, Default)]
pub struct LocaleRegistry {
    locales: LocaleSet,
}

impl LocaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new, already validated set.
    pub fn replace(&mut self, validated: LocaleSet) {
        debug!(count = validated.len(), "Locales have been changed");
        self.locales = validated;
    }

    /// The current set. Empty until initialized.
    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    pub fn contains(&self, locale: &Locale) -> bool {
        self.locales.contains(locale)
    }

    pub fn get(&self, index: usize) -> Option<&Locale> {
        self.locales.get_index(index)
    }

    /// Position of an exact (language and country) match.
    pub fn index_of(&self, locale: &Locale) -> Option<usize> {
        self.locales.get_index_of(locale)
    }

    /// One self-referential name per locale, in set order.
    pub fn locales_with_display_name(&self) -> Vec<String> {
        self.locales.iter().map(display_name).collect()
    }

    pub fn pseudo_locales(&self) -> [Locale; 2] {
        pseudo_locales()
    }

    pub fn is_pseudo_locale(&self, locale: &Locale) -> bool {
        locale.is_pseudo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(tags: &[&str]) -> LocaleSet {
        tags.iter().map(|t| Locale::parse(t).unwrap()).collect()
    }

    #[test]
    fn empty_until_initialized() {
        let reg = LocaleRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.get(0), None);
        assert!(reg.locales_with_display_name().is_empty());
    }

    #[test]
    fn replace_is_wholesale_and_keeps_order() {
        let mut reg = LocaleRegistry::new();
        reg.replace(set(&["en-US", "fr-FR", "de-DE"]));
        reg.replace(set(&["ja-JP", "en-US"]));

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(0), Some(&Locale::new("ja", "JP")));
        assert_eq!(reg.index_of(&Locale::new("en", "US")), Some(1));
        assert!(!reg.contains(&Locale::new("fr", "FR")));
    }

    #[test]
    fn display_names_follow_set_order() {
        let mut reg = LocaleRegistry::new();
        reg.replace(set(&["fr-FR", "en-US"]));
        assert_eq!(
            reg.locales_with_display_name(),
            vec!["français (France)", "English (United States)"]
        );
    }

    #[test]
    fn pseudo_locales_ignore_supported_set() {
        let mut reg = LocaleRegistry::new();
        let before = reg.pseudo_locales();
        reg.replace(set(&["en-US"]));
        assert_eq!(reg.pseudo_locales(), before);
        assert!(!reg.contains(&before[0]));
        assert!(reg.is_pseudo_locale(&before[1]));
    }
}
