//! Model families and their request shapes

use std::time::Duration;

use flashcards_config::COMPLETION_MODEL;

use crate::prompt::Prompt;
use crate::request::{
    ApiRequest, ChatCompletionRequest, ChatMessage, CompletionRequest, SamplingParams,
};

/// Token limit for completion-style requests
pub const COMPLETION_MAX_TOKENS: u32 = 300;

/// Token limit for chat-style requests
pub const CHAT_MAX_TOKENS: u32 = 1000;

/// Client-side timeout for chat-style requests
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(10);

/// How a model is called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Single-prompt text completion
    Completion,
    /// System and user messages
    Chat,
}

impl ModelFamily {
    /// Family of a model identifier
    ///
    /// Only [`COMPLETION_MODEL`] is completion-style; any other identifier is
    /// assumed to speak the chat API.
    pub fn from_model(model: &str) -> Self {
        if model == COMPLETION_MODEL {
            ModelFamily::Completion
        } else {
            ModelFamily::Chat
        }
    }

    /// Build the request for `model`
    pub fn build_request(&self, model: &str, prompt: &Prompt) -> ApiRequest {
        match self {
            ModelFamily::Completion => ApiRequest::Completion(CompletionRequest {
                model: model.to_string(),
                prompt: prompt.combined(),
                sampling: SamplingParams::with_max_tokens(COMPLETION_MAX_TOKENS),
            }),
            ModelFamily::Chat => ApiRequest::Chat(ChatCompletionRequest {
                model: model.to_string(),
                messages: vec![
                    ChatMessage::system(prompt.instructions.clone()),
                    ChatMessage::user(prompt.content.clone()),
                ],
                sampling: SamplingParams::with_max_tokens(CHAT_MAX_TOKENS),
                timeout: Some(CHAT_TIMEOUT),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Role;

    #[test]
    fn test_family_selection() {
        assert_eq!(ModelFamily::from_model("text-davinci-003"), ModelFamily::Completion);
        assert_eq!(ModelFamily::from_model("gpt-3.5-turbo"), ModelFamily::Chat);
        assert_eq!(ModelFamily::from_model("some-future-model"), ModelFamily::Chat);
    }

    #[test]
    fn test_completion_request() {
        let prompt = Prompt::new(5, "::", "Water is H2O.");
        let request = ModelFamily::Completion.build_request("text-davinci-003", &prompt);

        let ApiRequest::Completion(body) = &request else {
            panic!("expected completion request, got {request:?}");
        };
        assert_eq!(body.prompt, format!("{}\nWater is H2O.", prompt.instructions));
        assert_eq!(body.sampling.max_tokens, 300);
        assert_eq!(request.timeout(), None);
    }

    #[test]
    fn test_chat_request() {
        let prompt = Prompt::new(5, "::", "Water is H2O.");
        let request = ModelFamily::Chat.build_request("gpt-4", &prompt);

        let ApiRequest::Chat(body) = &request else {
            panic!("expected chat request, got {request:?}");
        };
        assert_eq!(body.messages.len(), 2);
        assert_eq!(body.messages[0].role, Role::System);
        assert_eq!(body.messages[0].content, prompt.instructions);
        assert_eq!(body.messages[1].role, Role::User);
        assert_eq!(body.messages[1].content, "Water is H2O.");
        assert_eq!(body.sampling.max_tokens, 1000);
        assert_eq!(body.sampling.temperature, 0.7);
        assert_eq!(request.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(request.model(), "gpt-4");
    }
}
