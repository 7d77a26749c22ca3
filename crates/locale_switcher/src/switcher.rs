use tracing::{debug, info, warn};

use crate::config::SwitcherConfig;
use crate::detector::{LocaleDetector, ResourceLookup};
use crate::error::{LocaleError, Result};
use crate::host::LocaleHost;
use crate::locale::Locale;
use crate::preferences::{LocalePreferences, PreferenceStorage};
use crate::registry::{LocaleRegistry, LocaleSet};

/// How the device locale was mapped onto the supported set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocaleMatch {
    /// Language and country both matched.
    Exact(usize),
    /// Only the language matched.
    Closest(usize),
    /// Nothing matched; callers fall back to index 0.
    NoMatch,
}

impl LocaleMatch {
    /// Position in the supported set, with `NoMatch` degraded to 0.
    pub fn index(self) -> usize {
        match self {
            LocaleMatch::Exact(i) | LocaleMatch::Closest(i) => i,
            LocaleMatch::NoMatch => 0,
        }
    }

    pub fn is_exact(self) -> bool {
        matches!(self, LocaleMatch::Exact(_))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SwitcherState {
    /// No index computed for the current device locale yet.
    #[default]
    Unresolved,
    Resolved(LocaleMatch),
}

/// Result of a locale switch.
///
/// `switched` is about the live configuration, `persisted` about the stored
/// preference. A live switch is never rolled back when persisting fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub switched: bool,
    pub persisted: bool,
}

impl SwitchOutcome {
    const UNCHANGED: Self = Self {
        switched: false,
        persisted: false,
    };
}

/// Registry, detector and preference record composed into one context.
///
/// The live configuration surface ([`LocaleHost`]) is passed to every call
/// that reads the device locale or applies a new one.
pub struct LocaleSwitcher<R, S> {
    registry: LocaleRegistry,
    detector: LocaleDetector<R>,
    preferences: LocalePreferences<S>,
    state: SwitcherState,
}

impl<R: ResourceLookup, S: PreferenceStorage> LocaleSwitcher<R, S> {
    pub fn new(detector: LocaleDetector<R>, preferences: LocalePreferences<S>) -> Self {
        Self {
            registry: LocaleRegistry::new(),
            detector,
            preferences,
            state: SwitcherState::Unresolved,
        }
    }

    /// Build a switcher from config.
    ///
    /// The base locale is captured from the host's configured locale on first
    /// run. The supported set comes from `supported` when given, otherwise
    /// from discovery on `resource_key`.
    pub fn from_config<H: LocaleHost + ?Sized>(
        config: &SwitcherConfig,
        resources: R,
        storage: S,
        host: &H,
    ) -> Self {
        let detector = LocaleDetector::with_candidates(resources, config.candidate_locales());
        let preferences = LocalePreferences::open(storage, &host.configured_locale());
        let mut switcher = Self::new(detector, preferences);

        if !config.supported.is_empty() {
            switcher.set_supported_locale_tags(&config.supported);
        } else if let Some(key) = config.resource_key.as_deref() {
            switcher.discover_supported_locales(key);
        }
        switcher
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    pub fn detector(&self) -> &LocaleDetector<R> {
        &self.detector
    }

    pub fn preferences(&self) -> &LocalePreferences<S> {
        &self.preferences
    }

    pub fn state(&self) -> SwitcherState {
        self.state
    }

    /// Replace the supported set with the validated subset of `candidates`.
    pub fn set_supported_locales<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = Locale>,
    {
        let validated = self.detector.validate_locales(candidates);
        self.registry.replace(validated);
        self.state = SwitcherState::Unresolved;
    }

    /// [`Self::set_supported_locales`] from string tags. Unparseable tags are
    /// skipped.
    pub fn set_supported_locale_tags<T: AsRef<str>>(&mut self, tags: &[T]) {
        let locales: Vec<Locale> = tags
            .iter()
            .filter_map(|tag| match Locale::parse(tag.as_ref()) {
                Ok(locale) => Some(locale),
                Err(e) => {
                    warn!("Skipping supported locale: {e}");
                    None
                }
            })
            .collect();
        self.set_supported_locales(locales);
    }

    pub fn fetch_available_locales(&self, resource_key: &str) -> LocaleSet {
        self.detector.fetch_available_locales(resource_key)
    }

    /// Discover the locales shipping `resource_key` and make them the
    /// supported set.
    pub fn discover_supported_locales(&mut self, resource_key: &str) -> &LocaleSet {
        let found = self.detector.fetch_available_locales(resource_key);
        self.set_supported_locales(found);
        self.registry.locales()
    }

    pub fn locales(&self) -> &LocaleSet {
        self.registry.locales()
    }

    pub fn locales_with_display_name(&self) -> Vec<String> {
        self.registry.locales_with_display_name()
    }

    pub fn pseudo_locales(&self) -> [Locale; 2] {
        self.registry.pseudo_locales()
    }

    pub fn preferred_locale(&self) -> Locale {
        self.preferences.preferred_locale()
    }

    pub fn base_locale(&self) -> Locale {
        self.preferences.base_locale()
    }

    /// Map the live device locale onto the supported set.
    ///
    /// Exact match first, then the closest same-language locale. Both misses
    /// are logged as warnings.
    pub fn resolve_current_locale<H: LocaleHost + ?Sized>(&mut self, host: &H) -> LocaleMatch {
        let locale = self.detector.current_locale(host);

        let resolved = match self.registry.index_of(&locale) {
            Some(index) => LocaleMatch::Exact(index),
            None => {
                warn!(
                    locale = %locale,
                    "Current device locale does not appear in the supported locales"
                );
                match self
                    .detector
                    .detect_closest_locale(self.registry.locales(), &locale)
                {
                    Some(index) => LocaleMatch::Closest(index),
                    None => {
                        warn!(
                            locale = %locale,
                            "Current locale index changed to 0 as the current locale is not supported"
                        );
                        LocaleMatch::NoMatch
                    }
                }
            }
        };

        self.state = SwitcherState::Resolved(resolved);
        resolved
    }

    /// Index of the device locale in the supported set. Never fails; 0 when
    /// nothing matches.
    pub fn current_locale_index<H: LocaleHost + ?Sized>(&mut self, host: &H) -> usize {
        self.resolve_current_locale(host).index()
    }

    /// Switch to the supported locale at `index`.
    ///
    /// A stale or invalid index is a caller bug and fails with
    /// [`LocaleError::IndexOutOfRange`]; the host is left untouched.
    pub fn set_app_locale_at<H: LocaleHost + ?Sized>(
        &mut self,
        host: &H,
        index: usize,
    ) -> Result<SwitchOutcome> {
        let locale = self
            .registry
            .get(index)
            .cloned()
            .ok_or(LocaleError::IndexOutOfRange {
                index,
                len: self.registry.len(),
            })?;
        Ok(self.set_app_locale(host, &locale))
    }

    /// Apply `locale` to the running process and persist it if it changed.
    pub fn set_app_locale<H: LocaleHost + ?Sized>(
        &mut self,
        host: &H,
        locale: &Locale,
    ) -> SwitchOutcome {
        let old = host.configured_locale();
        host.apply_locale(locale);

        if old == *locale {
            return SwitchOutcome::UNCHANGED;
        }

        let persisted = self.preferences.set_preferred_locale(locale);
        if persisted {
            info!(from = %old, to = %locale, "Switched app locale");
        } else {
            warn!(
                from = %old,
                to = %locale,
                "Switched app locale but the preference was not saved"
            );
        }

        SwitchOutcome {
            switched: true,
            persisted,
        }
    }

    /// Apply the persisted preferred locale at launch. Nothing is written
    /// back. Returns whether the live locale changed.
    pub fn restore_preferred_locale<H: LocaleHost + ?Sized>(&self, host: &H) -> bool {
        let preferred = self.preferences.preferred_locale();
        let old = host.configured_locale();
        if old == preferred {
            return false;
        }
        debug!(from = %old, to = %preferred, "Restoring preferred locale");
        host.apply_locale(&preferred);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogResources;
    use crate::host::SystemHost;
    use crate::preferences::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn loc(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn switcher() -> LocaleSwitcher<CatalogResources, MemoryStorage> {
        let mut res = CatalogResources::new(loc("en-US"));
        for (tag, name) in [("en-US", "Switcher"), ("fr-FR", "Sélecteur"), ("de-DE", "Umschalter")] {
            res.insert(&loc(tag), "app_name", name);
        }
        let prefs = LocalePreferences::open(MemoryStorage::new(), &loc("en-US"));
        LocaleSwitcher::new(LocaleDetector::new(res), prefs)
    }

    #[test]
    fn match_index_degrades_to_zero() {
        assert_eq!(LocaleMatch::Exact(2).index(), 2);
        assert_eq!(LocaleMatch::Closest(1).index(), 1);
        assert_eq!(LocaleMatch::NoMatch.index(), 0);
        assert!(LocaleMatch::Exact(0).is_exact());
        assert!(!LocaleMatch::Closest(0).is_exact());
    }

    #[test]
    fn replacing_supported_set_unresolves() {
        let mut sw = switcher();
        sw.set_supported_locale_tags(&["en-US", "fr-FR"]);
        let host = SystemHost::with_locale(loc("en-US"));
        sw.resolve_current_locale(&host);
        assert!(matches!(sw.state(), SwitcherState::Resolved(_)));

        sw.set_supported_locale_tags(&["de-DE", "not a tag", "xx-YY"]);
        assert_eq!(sw.state(), SwitcherState::Unresolved);
        assert_eq!(sw.locales().len(), 1);
    }

    #[test]
    fn discover_installs_found_locales() {
        let mut sw = switcher();
        let found: Vec<String> = sw
            .discover_supported_locales("app_name")
            .iter()
            .map(Locale::tag)
            .collect();
        assert_eq!(found, vec!["en-US", "de-DE", "fr-FR"]);
        assert_eq!(
            sw.locales_with_display_name(),
            vec!["English (United States)", "Deutsch (Deutschland)", "français (France)"]
        );
    }

    #[test]
    fn out_of_range_index_fails_fast() {
        let mut sw = switcher();
        sw.set_supported_locale_tags(&["en-US", "fr-FR"]);
        let host = SystemHost::with_locale(loc("en-US"));

        let err = sw.set_app_locale_at(&host, 2).unwrap_err();
        assert!(matches!(
            err,
            LocaleError::IndexOutOfRange { index: 2, len: 2 }
        ));
        assert_eq!(host.configured_locale(), loc("en-US"));
    }

    #[test]
    fn restore_applies_preference_without_writing() {
        let mut sw = switcher();
        let host = SystemHost::with_locale(loc("en-US"));
        assert!(!sw.restore_preferred_locale(&host));

        sw.set_app_locale(&host, &loc("fr-FR"));
        let relaunched = SystemHost::with_locale(loc("en-US"));
        assert!(sw.restore_preferred_locale(&relaunched));
        assert_eq!(relaunched.configured_locale(), loc("fr-FR"));
    }
}
