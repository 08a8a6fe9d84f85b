use clap::{Parser, Subcommand, ValueEnum};
use flashcards_config::ConfigKey;
use flashcards_core::LineRange;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "flashcards")]
#[command(about = "Generate flashcards for markdown notes with a language model")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses RUST_LOG or defaults to 'warn'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/flashcards-llm/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate flashcards for a note and append them to it
    Generate {
        /// Markdown note to generate flashcards for
        #[arg(value_name = "NOTE")]
        note: PathBuf,

        /// Directory that `![[...]]` links resolve against (defaults to the note's directory)
        #[arg(short, long, value_name = "DIR")]
        kiln: Option<PathBuf>,

        /// Only use these lines of the note, e.g. `12:30` (1-based, inclusive)
        #[arg(long, value_name = "A:B")]
        lines: Option<LineRange>,

        /// Print the block that would be appended instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Settings management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current settings (the API key is masked)
    Show,

    /// Change one setting and save it
    Set {
        /// Setting name (api_key, model, inline_separator, flashcard_count, endpoint)
        key: ConfigKey,

        /// New value
        value: String,

        /// Accept a model identifier outside the known list
        #[arg(short = 'F', long)]
        force: bool,
    },

    /// Print the settings file path
    Path,
}
