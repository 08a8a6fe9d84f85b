use anyhow::{Context, Result};
use colored::Colorize;

use flashcards_config::{ConfigFile, ConfigKey, FlashcardsConfig, API_KEY_ENV_VAR};

use crate::cli::ConfigCommands;
use crate::output;

/// Execute config subcommand
pub fn execute(config_file: &ConfigFile, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config_file),
        ConfigCommands::Set { key, value, force } => set(config_file, key, &value, force),
        ConfigCommands::Path => {
            println!("{}", config_file.path().display());
            Ok(())
        }
    }
}

/// Show the current effective settings
fn show(config_file: &ConfigFile) -> Result<()> {
    let config = config_file.load().context("Failed to load settings")?;

    println!("{}", format!("# {}", config_file.path().display()).dimmed());
    print!("{}", render(&config));

    if std::env::var(API_KEY_ENV_VAR).is_ok_and(|v| !v.trim().is_empty()) {
        println!(
            "{}",
            format!("# {API_KEY_ENV_VAR} is set and takes precedence over api_key").dimmed()
        );
    }
    Ok(())
}

/// `key = value` lines, secrets masked
fn render(config: &FlashcardsConfig) -> String {
    ConfigKey::ALL
        .iter()
        .map(|key| {
            let value = if key.is_secret() {
                config.masked_api_key()
            } else {
                config.get(*key)
            };
            format!("{key} = {value:?}\n")
        })
        .collect()
}

fn set(config_file: &ConfigFile, key: ConfigKey, value: &str, force: bool) -> Result<()> {
    let config = config_file.update(|config| config.set(key, value, force))?;

    let shown = if key.is_secret() {
        config.masked_api_key()
    } else {
        config.get(key)
    };
    output::success(&format!("{key} = {shown:?}"));
    Ok(())
}
