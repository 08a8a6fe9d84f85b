//! API key resolution
//!
//! [`resolve_api_key`] checks, in order:
//! 1. the `OPENAI_API_KEY` environment variable
//! 2. the `api_key` setting

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::settings::FlashcardsConfig;

/// Environment variable that overrides the stored API key
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Where a resolved API key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// From [`API_KEY_ENV_VAR`]
    EnvVar,
    /// From the settings file
    Config,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::EnvVar => write!(f, "env"),
            CredentialSource::Config => write!(f, "config"),
        }
    }
}

/// Resolve the API key, or [`ConfigError::MissingApiKey`] when neither source has one
///
/// Blank values count as unset.
pub fn resolve_api_key(config: &FlashcardsConfig) -> ConfigResult<(String, CredentialSource)> {
    if let Ok(value) = std::env::var(API_KEY_ENV_VAR) {
        let value = value.trim();
        if !value.is_empty() {
            debug!("Resolved API key from env var {}", API_KEY_ENV_VAR);
            return Ok((value.to_string(), CredentialSource::EnvVar));
        }
    }

    let stored = config.api_key.trim();
    if !stored.is_empty() {
        debug!("Resolved API key from config");
        return Ok((stored.to_string(), CredentialSource::Config));
    }

    Err(ConfigError::MissingApiKey(API_KEY_ENV_VAR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config_with_key(key: &str) -> FlashcardsConfig {
        FlashcardsConfig {
            api_key: key.to_string(),
            ..FlashcardsConfig::default()
        }
    }

    #[test]
    #[serial]
    fn env_var_wins() {
        std::env::set_var(API_KEY_ENV_VAR, "env-key");

        let result = resolve_api_key(&config_with_key("config-key")).unwrap();
        assert_eq!(result, ("env-key".to_string(), CredentialSource::EnvVar));

        std::env::remove_var(API_KEY_ENV_VAR);
    }

    #[test]
    #[serial]
    fn falls_back_to_config() {
        std::env::remove_var(API_KEY_ENV_VAR);

        let result = resolve_api_key(&config_with_key("config-key")).unwrap();
        assert_eq!(result, ("config-key".to_string(), CredentialSource::Config));
    }

    #[test]
    #[serial]
    fn blank_env_var_is_ignored() {
        std::env::set_var(API_KEY_ENV_VAR, "   ");

        let result = resolve_api_key(&config_with_key("config-key")).unwrap();
        assert_eq!(result.1, CredentialSource::Config);

        std::env::remove_var(API_KEY_ENV_VAR);
    }

    #[test]
    #[serial]
    fn missing_everywhere_is_an_error() {
        std::env::remove_var(API_KEY_ENV_VAR);

        let err = resolve_api_key(&FlashcardsConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(API_KEY_ENV_VAR)));
    }

    #[test]
    fn credential_source_display() {
        assert_eq!(CredentialSource::EnvVar.to_string(), "env");
        assert_eq!(CredentialSource::Config.to_string(), "config");
    }
}
