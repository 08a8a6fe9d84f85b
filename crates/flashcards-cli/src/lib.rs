//! Library half of the `flashcards` binary: argument parsing, logging setup and
//! command implementations.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
