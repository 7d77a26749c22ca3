//! Runtime locale switching
//!
//! - Discover which locales an app ships translations for by probing its
//!   string resources, ignoring silent fallbacks to the default locale
//! - Resolve the device locale against the supported set: exact match,
//!   then same-language match, then index 0
//! - Persist the user's preferred locale and the app's base locale
//! - Apply a switch to the live configuration; persistence is best-effort and
//!   never blocks the switch
//!
//! External collaborators sit behind traits: [`ResourceLookup`] (string
//! resources), [`PreferenceStorage`] (durable key-value records) and
//! [`LocaleHost`] (device locale + live configuration). Everything is composed
//! in a [`LocaleSwitcher`] built once at startup.

mod catalog;
mod config;
mod detector;
mod display;
mod error;
mod host;
mod locale;
mod preferences;
mod registry;
mod switcher;

pub use catalog::{CatalogResources, StringCatalog};
pub use config::SwitcherConfig;
pub use detector::{LocaleDetector, Lookup, ResourceLookup, DEFAULT_CANDIDATES};
pub use display::{display_name, language_autonym};
pub use error::{LocaleError, Result};
pub use host::{detect_locale_from_env, parse_env_locale, LocaleHost, SystemHost, FALLBACK_LOCALE};
pub use locale::{normalize_locale, pseudo_locales, Locale};
pub use preferences::{
    FileStorage, LocalePreferences, MemoryStorage, PreferenceStorage, BASE_LOCALE_KEY,
    PREFERRED_LOCALE_KEY,
};
pub use registry::{LocaleRegistry, LocaleSet};
pub use switcher::{LocaleMatch, LocaleSwitcher, SwitchOutcome, SwitcherState};
