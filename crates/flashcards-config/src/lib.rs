//! # Flashcards Configuration
//!
//! Settings for flashcards-llm: the API credential, the model identifier, the
//! inline separator between question and answer, plus the flashcard count and API
//! endpoint.
//!
//! Settings live in a TOML file (`~/.config/flashcards-llm/config.toml` by
//! default). Loading merges built-in defaults under whatever the file sets;
//! every change made through [`ConfigFile::update`] is written back immediately.
//!
//! ```rust,no_run
//! use flashcards_config::{ConfigFile, ConfigKey};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = ConfigFile::new();
//!     file.update(|config| config.set(ConfigKey::Model, "gpt-3.5-turbo", false))?;
//!     let config = file.load()?;
//!     let (api_key, source) = flashcards_config::resolve_api_key(&config)?;
//!     println!("using {} key from {source}", config.model);
//!     # let _ = api_key;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod credentials;
mod error;
mod file;
mod settings;

pub use credentials::{resolve_api_key, CredentialSource, API_KEY_ENV_VAR};
pub use error::{ConfigError, ConfigResult};
pub use file::ConfigFile;
pub use settings::{
    ConfigKey, FlashcardsConfig, COMPLETION_MODEL, DEFAULT_ENDPOINT, DEFAULT_FLASHCARD_COUNT,
    DEFAULT_MODEL, DEFAULT_SEPARATOR, KNOWN_MODELS,
};
