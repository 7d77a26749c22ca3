//! Switcher configuration (TOML)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LocaleError, Result};
use crate::locale::Locale;
use crate::preferences::{FileStorage, MemoryStorage, PreferenceStorage};

/// ```toml
/// resource_key = "app_name"
/// supported = ["en-US", "fr-FR"]
/// candidates = []
/// preferences_path = "locale.toml"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SwitcherConfig {
    /// String resource used to discover which locales ship translations
    #[serde(default)]
    pub resource_key: Option<String>,
    /// Explicit supported locales; takes precedence over discovery
    #[serde(default)]
    pub supported: Vec<String>,
    /// Locales probed by discovery; empty means the built-in list
    #[serde(default)]
    pub candidates: Vec<String>,
    /// Where the preference record lives; absent keeps it in memory
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
}

impl SwitcherConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| LocaleError::Config(e.to_string()))
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            LocaleError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            LocaleError::Config(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parsed `candidates`; invalid tags are skipped with a warning.
    pub fn candidate_locales(&self) -> Vec<Locale> {
        self.candidates
            .iter()
            .filter_map(|tag| match Locale::parse(tag) {
                Ok(locale) => Some(locale),
                Err(e) => {
                    warn!("Skipping candidate locale: {e}");
                    None
                }
            })
            .collect()
    }

    /// File storage at `preferences_path`, or memory storage without one.
    pub fn preference_storage(&self) -> Box<dyn PreferenceStorage> {
        match &self.preferences_path {
            Some(path) => Box::new(FileStorage::new(path.clone())),
            None => Box::new(MemoryStorage::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_full_config() {
        let cfg = SwitcherConfig::from_toml_str(
            r#"
resource_key = "app_name"
supported = ["en-US", "fr-FR"]
candidates = ["en-GB", "bogus tag"]
preferences_path = "state/locale.toml"
"#,
        )
        .unwrap();

        assert_eq!(cfg.resource_key.as_deref(), Some("app_name"));
        assert_eq!(cfg.supported, vec!["en-US", "fr-FR"]);
        assert_eq!(cfg.candidate_locales(), vec![Locale::new("en", "GB")]);
        assert_eq!(
            cfg.preferences_path.as_deref(),
            Some(Path::new("state/locale.toml"))
        );
    }

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = SwitcherConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, SwitcherConfig::default());
        assert!(cfg.candidate_locales().is_empty());
    }

    #[test]
    fn rejects_wrong_types() {
        let err = SwitcherConfig::from_toml_str("supported = 3").unwrap_err();
        assert!(matches!(err, LocaleError::Config(_)));
    }

    #[test]
    fn toml_roundtrip_and_load() {
        let cfg = SwitcherConfig {
            resource_key: Some("title".to_string()),
            supported: vec!["ja-JP".to_string()],
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("switcher.toml");
        fs::write(&path, cfg.to_toml().unwrap()).unwrap();

        assert_eq!(SwitcherConfig::load(&path).unwrap(), cfg);
        assert!(SwitcherConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
