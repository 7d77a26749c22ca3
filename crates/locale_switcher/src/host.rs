//! The live configuration surface: where the device locale comes from and
//! where a switched locale is applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::locale::Locale;

/// Hard fallback when the environment carries no usable locale.
pub const FALLBACK_LOCALE: (&str, &str) = ("en", "US");

/// Host-side locale configuration.
///
/// `apply_locale` must take effect for every resource lookup that happens
/// after it returns.
pub trait LocaleHost {
    /// The current locale, read fresh on every call.
    ///
    /// This is the system locale until the app applies one of its own; after
    /// that it is the applied locale.
    fn device_locale(&self) -> Locale;

    /// The locale the running process is currently configured with.
    fn configured_locale(&self) -> Locale;

    /// Reconfigure the running process to use `locale`.
    fn apply_locale(&self, locale: &Locale);
}

type ChangeCallback = Box<dyn Fn(&Locale) + Send + Sync>;

/// Host backed by the POSIX locale environment.
///
/// Until [`LocaleHost::apply_locale`] is called, the device locale is read
/// from `LC_ALL`, `LC_MESSAGES` and `LANG` (in that order) each time it is
/// asked for. Once the app has applied a locale, that locale is reported.
pub struct SystemHost {
    configured: RwLock<Locale>,
    switched: AtomicBool,
    on_change: Option<ChangeCallback>,
}

impl SystemHost {
    pub fn new() -> Self {
        Self::with_locale(detect_locale_from_env().unwrap_or_else(fallback_locale))
    }

    /// Start with an explicit configured locale instead of the device one.
    pub fn with_locale(locale: Locale) -> Self {
        Self {
            configured: RwLock::new(locale),
            switched: AtomicBool::new(false),
            on_change: None,
        }
    }

    /// Register a callback invoked after the configured locale changes.
    ///
    /// The app should hook its redraw/rebuild here.
    pub fn on_change(mut self, callback: impl Fn(&Locale) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SystemHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemHost")
            .field("configured", &self.configured_locale())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl LocaleHost for SystemHost {
    fn device_locale(&self) -> Locale {
        if self.switched.load(Ordering::Acquire) {
            return self.configured_locale();
        }
        detect_locale_from_env().unwrap_or_else(fallback_locale)
    }

    fn configured_locale(&self) -> Locale {
        self.configured
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn apply_locale(&self, locale: &Locale) {
        let mut cur = self
            .configured
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        self.switched.store(true, Ordering::Release);
        if *cur == *locale {
            return;
        }
        debug!("SystemHost::apply_locale: {} -> {}", *cur, locale);
        *cur = locale.clone();
        drop(cur);

        if let Some(cb) = &self.on_change {
            cb(locale);
        }
    }
}

fn fallback_locale() -> Locale {
    Locale::new(FALLBACK_LOCALE.0, FALLBACK_LOCALE.1)
}

/// Parse a POSIX locale variable value.
///
/// Examples: "en_US.UTF-8", "ko_KR", "en-US". "C" and "POSIX" carry no
/// language and yield `None`.
pub fn parse_env_locale(raw: &str) -> Option<Locale> {
    // LANGUAGE-style lists ("fr:en") use the first entry
    let first = raw.split(':').next().unwrap_or(raw);
    Locale::parse(first).ok()
}

/// First usable locale in `LC_ALL`, `LC_MESSAGES`, `LANG`.
pub fn detect_locale_from_env() -> Option<Locale> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .find_map(|key| std::env::var(key).ok().and_then(|v| parse_env_locale(&v)))
}
