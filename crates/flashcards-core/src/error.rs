//! Error types shared across the flashcards crates

use std::path::PathBuf;

/// Errors from note store operations
#[derive(Debug, thiserror::Error)]
pub enum KilnError {
    /// The kiln root is missing or not a directory
    #[error("kiln root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// IO error while reading a note
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A handle referred to a note that is not in the store
    #[error("note not found: {0}")]
    NoteNotFound(String),
}

/// Result type for note store operations
pub type KilnResult<T> = Result<T, KilnError>;

/// Errors raised while generating flashcards
///
/// `NoResponse` and `UnrecognizedResponse` are the two normalization failures. The
/// remaining variants are propagated from the transport. All of them abort the
/// invocation before the document is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// No choice (or no body at all) came back from the API
    #[error("No response received from the completion API: {0}")]
    NoResponse(String),

    /// A choice came back but nothing in it unwraps to a string
    #[error("Cannot recognize the response received from the completion API: {0}")]
    UnrecognizedResponse(String),

    /// The API answered with a non-success status
    #[error("Completion API error ({status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The request exceeded its timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection or protocol failure
    #[error("HTTP error: {0}")]
    Transport(String),
}

/// Result type for generation
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors from a full pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The requested selection does not fit the document
    #[error("selection {requested} is outside the document ({lines} lines)")]
    InvalidSelection {
        /// Selection as given by the caller
        requested: String,
        /// Number of lines in the document
        lines: usize,
    },

    /// Generation failed
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Result type for pipeline runs
pub type PipelineResult<T> = Result<T, PipelineError>;
