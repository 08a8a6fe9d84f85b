//! Tracing subscriber setup

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

const CRATES: [&str; 4] = [
    "flashcards_cli",
    "flashcards_core",
    "flashcards_config",
    "flashcards_llm",
];

/// Filter directive applying `level` to this workspace's crates only
pub fn directive(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Level requested on the command line; `None` defers to `RUST_LOG`
fn requested_level(log_level: Option<LogLevel>, verbose: bool) -> Option<LevelFilter> {
    match (log_level, verbose) {
        (Some(level), _) => Some(level.into()),
        (None, true) => Some(LevelFilter::DEBUG),
        (None, false) => None,
    }
}

/// Pick the filter: `--log-level`, then `--verbose`, then `RUST_LOG`, then `warn`
pub fn env_filter(log_level: Option<LogLevel>, verbose: bool) -> EnvFilter {
    match requested_level(log_level, verbose) {
        Some(level) => EnvFilter::new(directive(level)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(directive(LevelFilter::WARN))),
    }
}

/// Install the global subscriber; logs go to stderr
pub fn init(log_level: Option<LogLevel>, verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level, verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_covers_workspace_crates() {
        assert_eq!(
            directive(LevelFilter::DEBUG),
            "flashcards_cli=debug,flashcards_core=debug,flashcards_config=debug,flashcards_llm=debug"
        );
    }

    #[test]
    fn explicit_level_beats_verbose() {
        assert_eq!(
            requested_level(Some(LogLevel::Error), true),
            Some(LevelFilter::ERROR)
        );
        assert_eq!(requested_level(None, true), Some(LevelFilter::DEBUG));
        assert_eq!(requested_level(None, false), None);
    }
}
