//! Request bodies for the OpenAI completion endpoints

use std::time::Duration;

use serde::Serialize;

/// Sampling parameters shared by both request shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingParams {
    /// Sampling temperature
    pub temperature: f64,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Nucleus sampling mass
    pub top_p: f64,
    /// Frequency penalty
    pub frequency_penalty: f64,
    /// Presence penalty
    pub presence_penalty: f64,
}

impl SamplingParams {
    /// Defaults used for flashcard generation, with the given token limit
    pub fn with_max_tokens(max_tokens: u32) -> Self {
        Self {
            temperature: 0.7,
            max_tokens,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// `POST /completions` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Instructions and note text in one string
    pub prompt: String,
    /// Sampling parameters
    #[serde(flatten)]
    pub sampling: SamplingParams,
}

/// Chat message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions
    System,
    /// The note
    User,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Author
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// `POST /chat/completions` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier
    pub model: String,
    /// System instructions followed by the note
    pub messages: Vec<ChatMessage>,
    /// Sampling parameters
    #[serde(flatten)]
    pub sampling: SamplingParams,
    /// Client-side timeout for the whole request
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

/// A request ready to send, in either shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiRequest {
    /// Legacy text completion
    Completion(CompletionRequest),
    /// Chat completion
    Chat(ChatCompletionRequest),
}

impl ApiRequest {
    /// Path appended to the API base URL
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            ApiRequest::Completion(_) => "/completions",
            ApiRequest::Chat(_) => "/chat/completions",
        }
    }

    /// Client-side timeout, if the request shape sets one
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            ApiRequest::Completion(_) => None,
            ApiRequest::Chat(request) => request.timeout,
        }
    }

    /// Model identifier
    pub fn model(&self) -> &str {
        match self {
            ApiRequest::Completion(request) => &request.model,
            ApiRequest::Chat(request) => &request.model,
        }
    }

    /// Sampling parameters
    pub fn sampling(&self) -> &SamplingParams {
        match self {
            ApiRequest::Completion(request) => &request.sampling,
            ApiRequest::Chat(request) => &request.sampling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_body_is_flat() {
        let request = ApiRequest::Chat(ChatCompletionRequest {
            model: "gpt-3.5-turbo".into(),
            messages: vec![ChatMessage::system("rules"), ChatMessage::user("note")],
            sampling: SamplingParams::with_max_tokens(1000),
            timeout: Some(Duration::from_secs(10)),
        });

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "rules"},
                    {"role": "user", "content": "note"}
                ],
                "temperature": 0.7,
                "max_tokens": 1000,
                "top_p": 1.0,
                "frequency_penalty": 0.0,
                "presence_penalty": 0.0
            })
        );
        assert_eq!(request.endpoint_path(), "/chat/completions");
    }

    #[test]
    fn test_completion_body_has_no_timeout() {
        let request = ApiRequest::Completion(CompletionRequest {
            model: "text-davinci-003".into(),
            prompt: "rules\nnote".into(),
            sampling: SamplingParams::with_max_tokens(300),
        });

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["prompt"], "rules\nnote");
        assert_eq!(body["max_tokens"], 300);
        assert!(body.get("messages").is_none());
        assert_eq!(request.timeout(), None);
        assert_eq!(request.endpoint_path(), "/completions");
    }
}
