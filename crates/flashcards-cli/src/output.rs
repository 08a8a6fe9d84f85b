//! User-facing notices
//!
//! Notices go to stderr so that stdout only carries command output (the
//! dry-run block, `config show`).

use colored::Colorize;

/// Shown while the request is in flight
pub const GENERATING: &str = "Generating flashcards...";

/// Shown after the note was updated
pub const GENERATED: &str = "Flashcards successfully generated!";

/// Shown for any failure during generation; details go to the log
pub const GENERATION_FAILED: &str =
    "Error generating flashcards. Please check the log output for details.";

/// Progress notice
pub fn notice(message: &str) {
    eprintln!("{}", message.cyan());
}

/// Success notice
pub fn success(message: &str) {
    eprintln!("{} {}", "Success:".green().bold(), message);
}
