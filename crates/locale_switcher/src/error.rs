use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("invalid locale tag `{tag}`: {reason}")]
    InvalidTag { tag: String, reason: String },

    /// A positional lookup used a stale or invalid index.
    #[error("locale index {index} out of range for {len} supported locales")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("preference storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("corrupt preference record {}: {source}", path.display())]
    CorruptRecord {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize preference record: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// Result type for locale operations
pub type Result<T> = std::result::Result<T, LocaleError>;
