//! Response normalization
//!
//! Completion replies carry `choices[0].text`, chat replies carry
//! `choices[0].message.content`. A choice that has a `message` key is read only
//! through that message; the choice's own fields are consulted only when there
//! is no message. Within that scope `text`, then `content`, then the value
//! itself are tried and the first string wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use flashcards_core::{GenerationError, GenerationResult};

/// Loosely typed reply body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Model that answered, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Candidate replies; `None` when the key is missing or `null`
    #[serde(default)]
    pub choices: Option<Vec<Value>>,
}

impl ResponseEnvelope {
    /// First choice, unless it is absent or `null`
    pub fn first_choice(&self) -> Option<&Value> {
        self.choices
            .as_deref()
            .and_then(<[Value]>::first)
            .filter(|choice| !choice.is_null())
    }
}

type Extractor = fn(&Value) -> Option<&str>;

/// Extraction attempts on the unwrapped choice, in priority order
const EXTRACTORS: [(&str, Extractor); 3] = [
    ("text", text_field),
    ("content", content_field),
    ("bare", bare_string),
];

fn text_field(scope: &Value) -> Option<&str> {
    scope.get("text")?.as_str()
}

fn content_field(scope: &Value) -> Option<&str> {
    scope.get("content")?.as_str()
}

fn bare_string(scope: &Value) -> Option<&str> {
    scope.as_str()
}

/// The nested message when the choice has one, otherwise the choice itself
fn unwrap_message(choice: &Value) -> (&'static str, &Value) {
    match choice.get("message") {
        Some(message) => ("message", message),
        None => ("choice", choice),
    }
}

/// Extract the generated text from the first choice, trimmed
pub fn normalize(envelope: &ResponseEnvelope) -> GenerationResult<String> {
    let choice = envelope
        .first_choice()
        .ok_or_else(|| GenerationError::NoResponse("response contains no choices".into()))?;

    let (scope_name, scope) = unwrap_message(choice);

    EXTRACTORS
        .iter()
        .find_map(|(name, extract)| {
            extract(scope).map(|text| {
                trace!(scope = scope_name, field = *name, "extracted response text");
                text.trim().to_string()
            })
        })
        .ok_or_else(|| {
            GenerationError::UnrecognizedResponse(format!("no text in first choice: {choice}"))
        })
}
