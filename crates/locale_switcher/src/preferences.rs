//! Durable record of the user's preferred locale and the app's base locale.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::error::{LocaleError, Result};
use crate::locale::Locale;

pub const PREFERRED_LOCALE_KEY: &str = "preferred_locale";
pub const BASE_LOCALE_KEY: &str = "base_locale";

/// Key-value storage that survives process restarts.
pub trait PreferenceStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: PreferenceStorage + ?Sized> PreferenceStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Process-local storage. Nothing survives a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Records kept as a flat TOML table in a single file.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// record, so readers see either the old or the new contents.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|source| LocaleError::CorruptRecord {
            path: self.path.clone(),
            source,
        })
    }

    fn store(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string(values)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PreferenceStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.store(&values)
    }
}

/// Preferred and base locale on top of a [`PreferenceStorage`].
///
/// Storage failures never escape: reads degrade to the base locale and writes
/// report `false`.
#[derive(Debug)]
pub struct LocalePreferences<S> {
    storage: S,
    base: Locale,
}

impl<S: PreferenceStorage> LocalePreferences<S> {
    /// Open the record, capturing `initial` as the base locale if this is the
    /// first run. An existing base locale is never replaced.
    ///
    /// If the record cannot be read, `initial` is used for this session only
    /// and storage is left untouched.
    pub fn open(mut storage: S, initial: &Locale) -> Self {
        let stored = match storage.get(BASE_LOCALE_KEY) {
            Ok(stored) => stored,
            Err(e) => {
                error!(locale = %initial, "Failed to read base locale, not capturing: {e}");
                return Self {
                    storage,
                    base: initial.clone(),
                };
            }
        };

        if let Some(raw) = stored {
            match Locale::parse(&raw) {
                Ok(base) => return Self { storage, base },
                Err(e) => warn!(value = %raw, "Recapturing corrupt base locale: {e}"),
            }
        }

        match storage.set(BASE_LOCALE_KEY, &initial.tag()) {
            Ok(()) => debug!(locale = %initial, "Captured base locale"),
            Err(e) => error!(locale = %initial, "Failed to persist base locale: {e}"),
        }
        Self {
            storage,
            base: initial.clone(),
        }
    }

    /// The locale captured at first run.
    pub fn base_locale(&self) -> Locale {
        self.base.clone()
    }

    /// Last persisted preference, or the base locale if none was ever set.
    pub fn preferred_locale(&self) -> Locale {
        read_locale(&self.storage, PREFERRED_LOCALE_KEY).unwrap_or_else(|| self.base.clone())
    }

    /// Whether the user ever picked a locale explicitly.
    pub fn has_preferred_locale(&self) -> bool {
        read_locale(&self.storage, PREFERRED_LOCALE_KEY).is_some()
    }

    /// Persist `locale` as the preference. `false` on storage failure.
    pub fn set_preferred_locale(&mut self, locale: &Locale) -> bool {
        match self.storage.set(PREFERRED_LOCALE_KEY, &locale.tag()) {
            Ok(()) => {
                info!(locale = %locale, "Locale preferences updated");
                true
            }
            Err(e) => {
                error!(locale = %locale, "Failed to update locale preferences: {e}");
                false
            }
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

fn read_locale<S: PreferenceStorage + ?Sized>(storage: &S, key: &str) -> Option<Locale> {
    let raw = match storage.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            error!(key, "Failed to read locale preference: {e}");
            return None;
        }
    };
    match Locale::parse(&raw) {
        Ok(locale) => Some(locale),
        Err(e) => {
            warn!(key, value = %raw, "Ignoring corrupt locale preference: {e}");
            None
        }
    }
}
