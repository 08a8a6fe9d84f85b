//! Settings values and their defaults

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// The single completion-style model; every other identifier is chat-style
pub const COMPLETION_MODEL: &str = "text-davinci-003";

/// Models offered by `config set model` without `--force`
pub const KNOWN_MODELS: &[&str] = &[COMPLETION_MODEL, "gpt-3.5-turbo", "gpt-4", "gpt-4o-mini"];

/// Default model identifier
pub const DEFAULT_MODEL: &str = COMPLETION_MODEL;

/// Default separator between question and answer
pub const DEFAULT_SEPARATOR: &str = "::";

/// Default upper bound on flashcards per request
pub const DEFAULT_FLASHCARD_COUNT: u32 = 5;

/// Default API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Persisted settings
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashcardsConfig {
    /// API credential; empty means unset
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Separator between question and answer in inline flashcards
    pub inline_separator: String,
    /// Maximum number of new flashcards per request
    pub flashcard_count: u32,
    /// API base URL
    pub endpoint: String,
}

impl Default for FlashcardsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            inline_separator: DEFAULT_SEPARATOR.to_string(),
            flashcard_count: DEFAULT_FLASHCARD_COUNT,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl FlashcardsConfig {
    /// Current value of a setting, as text (the API key is returned unmasked)
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::ApiKey => self.api_key.clone(),
            ConfigKey::Model => self.model.clone(),
            ConfigKey::InlineSeparator => self.inline_separator.clone(),
            ConfigKey::FlashcardCount => self.flashcard_count.to_string(),
            ConfigKey::Endpoint => self.endpoint.clone(),
        }
    }

    /// Change a setting from its text form
    ///
    /// `model` must be one of [`KNOWN_MODELS`] unless `force` is set.
    pub fn set(&mut self, key: ConfigKey, value: &str, force: bool) -> ConfigResult<()> {
        match key {
            ConfigKey::ApiKey => self.api_key = value.trim().to_string(),
            ConfigKey::Model => {
                let model = value.trim();
                if model.is_empty() {
                    return Err(invalid(key, "model identifier cannot be empty"));
                }
                if !force && !KNOWN_MODELS.contains(&model) {
                    return Err(invalid(
                        key,
                        format!(
                            "'{model}' is not a known model ({}); pass --force to use it anyway",
                            KNOWN_MODELS.join(", ")
                        ),
                    ));
                }
                self.model = model.to_string();
            }
            ConfigKey::InlineSeparator => self.inline_separator = value.to_string(),
            ConfigKey::FlashcardCount => {
                let count: u32 = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid(key, format!("'{value}' is not a whole number")))?;
                if count == 0 {
                    return Err(invalid(key, "must be at least 1"));
                }
                self.flashcard_count = count;
            }
            ConfigKey::Endpoint => {
                let endpoint = value.trim().trim_end_matches('/');
                if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                    return Err(invalid(key, "must start with http:// or https://"));
                }
                self.endpoint = endpoint.to_string();
            }
        }
        Ok(())
    }

    /// The API key with all but its last four characters hidden
    pub fn masked_api_key(&self) -> String {
        let key = self.api_key.as_str();
        if key.is_empty() {
            return "(not set)".to_string();
        }
        let visible: String = key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        if key.chars().count() <= 4 {
            "****".to_string()
        } else {
            format!("****{visible}")
        }
    }
}

fn invalid(key: ConfigKey, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.as_str(),
        reason: reason.into(),
    }
}

/// Names of the settings exposed to the settings surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `api_key`
    ApiKey,
    /// `model`
    Model,
    /// `inline_separator`
    InlineSeparator,
    /// `flashcard_count`
    FlashcardCount,
    /// `endpoint`
    Endpoint,
}

impl ConfigKey {
    /// Every key, in display order
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::ApiKey,
        ConfigKey::Model,
        ConfigKey::InlineSeparator,
        ConfigKey::FlashcardCount,
        ConfigKey::Endpoint,
    ];

    /// The key as written in the settings file
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::ApiKey => "api_key",
            ConfigKey::Model => "model",
            ConfigKey::InlineSeparator => "inline_separator",
            ConfigKey::FlashcardCount => "flashcard_count",
            ConfigKey::Endpoint => "endpoint",
        }
    }

    /// Whether the value is a secret and should be masked when shown
    pub fn is_secret(&self) -> bool {
        matches!(self, ConfigKey::ApiKey)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_lowercase();
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FlashcardsConfig::default();
        assert_eq!(config.api_key, "");
        assert_eq!(config.model, "text-davinci-003");
        assert_eq!(config.inline_separator, "::");
        assert_eq!(config.flashcard_count, 5);
        assert_eq!(config.endpoint, "https://api.openai.com/v1");
    }

    #[test]
    fn test_partial_toml_merges_over_defaults() {
        let toml = r#"
            model = "gpt-3.5-turbo"
            inline_separator = ";;"
        "#;
        let config: FlashcardsConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.inline_separator, ";;");
        assert_eq!(config.flashcard_count, DEFAULT_FLASHCARD_COUNT);
        assert_eq!(config.api_key, "");
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!("api_key".parse::<ConfigKey>().unwrap(), ConfigKey::ApiKey);
        assert_eq!(
            "inline-separator".parse::<ConfigKey>().unwrap(),
            ConfigKey::InlineSeparator
        );
        assert!(matches!(
            "temperature".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_set_model_requires_known_or_force() {
        let mut config = FlashcardsConfig::default();
        config.set(ConfigKey::Model, "gpt-4", false).unwrap();
        assert_eq!(config.model, "gpt-4");

        let err = config.set(ConfigKey::Model, "my-local-model", false).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "model", .. }));

        config.set(ConfigKey::Model, "my-local-model", true).unwrap();
        assert_eq!(config.get(ConfigKey::Model), "my-local-model");
    }

    #[test]
    fn test_set_flashcard_count_validates() {
        let mut config = FlashcardsConfig::default();
        config.set(ConfigKey::FlashcardCount, "8", false).unwrap();
        assert_eq!(config.flashcard_count, 8);
        assert!(config.set(ConfigKey::FlashcardCount, "0", false).is_err());
        assert!(config.set(ConfigKey::FlashcardCount, "many", false).is_err());
    }

    #[test]
    fn test_set_endpoint_strips_trailing_slash() {
        let mut config = FlashcardsConfig::default();
        config
            .set(ConfigKey::Endpoint, "http://localhost:8080/v1/", false)
            .unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/v1");
        assert!(config.set(ConfigKey::Endpoint, "localhost", false).is_err());
    }

    #[test]
    fn test_masked_api_key() {
        let mut config = FlashcardsConfig::default();
        assert_eq!(config.masked_api_key(), "(not set)");
        config.api_key = "sk-abcdef123456".to_string();
        assert_eq!(config.masked_api_key(), "****3456");
        config.api_key = "abc".to_string();
        assert_eq!(config.masked_api_key(), "****");
    }
}
