//! Configuration errors

use std::path::PathBuf;

/// Errors from loading, saving or editing settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading or writing the settings file
    #[error("config IO error at {}: {source}", path.display())]
    Io {
        /// Settings file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`crate::FlashcardsConfig`]
    #[error("config parse error in {}: {source}", path.display())]
    Parse {
        /// Settings file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// Settings could not be serialized
    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No API key in the environment or the settings file
    #[error("API key is not set; run `flashcards config set api_key <KEY>` or export {0}")]
    MissingApiKey(&'static str),

    /// `set`/`get` with a key that does not exist
    #[error("unknown setting '{0}' (expected one of: api_key, model, inline_separator, flashcard_count, endpoint)")]
    UnknownKey(String),

    /// A value that does not fit its setting
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting name
        key: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
