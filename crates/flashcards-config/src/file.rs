//! The settings file on disk

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::settings::FlashcardsConfig;

/// TOML settings file
///
/// Written with `0o600` permissions on unix because it may hold the API key.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// Settings file at the default path
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    /// Settings file at a custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default path: `$XDG_CONFIG_HOME/flashcards-llm/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".config")
            })
            .join("flashcards-llm")
            .join("config.toml")
    }

    /// Path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, with defaults for anything the file leaves out
    ///
    /// A missing or blank file yields the defaults.
    pub fn load(&self) -> ConfigResult<FlashcardsConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(FlashcardsConfig::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(FlashcardsConfig::default());
        }

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Write settings, creating parent directories as needed
    pub fn save(&self, config: &FlashcardsConfig) -> ConfigResult<()> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let toml_str = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, toml_str).map_err(io_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, perms).map_err(io_err)?;
        }

        debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }

    /// Load, change and save in one step
    ///
    /// Nothing is written when `change` fails.
    pub fn update<F>(&self, change: F) -> ConfigResult<FlashcardsConfig>
    where
        F: FnOnce(&mut FlashcardsConfig) -> ConfigResult<()>,
    {
        let mut config = self.load()?;
        change(&mut config)?;
        self.save(&config)?;
        Ok(config)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new()
    }
}
