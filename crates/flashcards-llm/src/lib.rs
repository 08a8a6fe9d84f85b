//! # Flashcards LLM
//!
//! The HTTP-backed [`FlashcardGenerator`](flashcards_core::FlashcardGenerator).
//!
//! A request is built in three steps: HTML comments are stripped from the note,
//! the instruction prompt is rendered for the configured count and separator, and
//! the model identifier picks a [`ModelFamily`] which shapes the request body
//! (legacy text completion or chat). The reply is normalized to a single trimmed
//! string by [`normalize`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod generator;
pub mod model;
pub mod prompt;
pub mod request;
pub mod response;

pub use client::{CompletionApi, OpenAIClient};
pub use generator::{GeneratorSettings, LlmFlashcardGenerator};
pub use model::ModelFamily;
pub use prompt::{instructions, strip_comments, Prompt};
pub use request::{
    ApiRequest, ChatCompletionRequest, ChatMessage, CompletionRequest, Role, SamplingParams,
};
pub use response::{normalize, ResponseEnvelope};
