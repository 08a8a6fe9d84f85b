//! [`FlashcardGenerator`] backed by a completion API

use async_trait::async_trait;
use tracing::{debug, error};

use flashcards_config::FlashcardsConfig;
use flashcards_core::markers::{count_flashcards, existing_flashcards};
use flashcards_core::{FlashcardGenerator, GenerationResult};

use crate::client::{CompletionApi, OpenAIClient};
use crate::model::ModelFamily;
use crate::prompt::{strip_comments, Prompt};
use crate::request::ApiRequest;
use crate::response::normalize;

/// Settings the generator reads for each request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Model identifier
    pub model: String,
    /// Separator between question and answer
    pub separator: String,
    /// Maximum number of new flashcards
    pub flashcard_count: u32,
}

impl GeneratorSettings {
    /// Take the generation settings out of a loaded config
    pub fn from_config(config: &FlashcardsConfig) -> Self {
        Self {
            model: config.model.clone(),
            separator: config.inline_separator.clone(),
            flashcard_count: config.flashcard_count,
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::from_config(&FlashcardsConfig::default())
    }
}

/// Generates flashcards with one request per call
pub struct LlmFlashcardGenerator<C> {
    api: C,
    settings: GeneratorSettings,
    family: ModelFamily,
}

impl<C: CompletionApi> LlmFlashcardGenerator<C> {
    /// Create a generator over any [`CompletionApi`]
    pub fn new(api: C, settings: GeneratorSettings) -> Self {
        let family = ModelFamily::from_model(&settings.model);
        Self {
            api,
            settings,
            family,
        }
    }

    /// Settings in use
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Family chosen for the configured model
    pub fn family(&self) -> ModelFamily {
        self.family
    }

    /// The request that would be sent for `content`
    pub fn build_request(&self, content: &str) -> ApiRequest {
        let cleaned = strip_comments(content);
        let prompt = Prompt::new(self.settings.flashcard_count, &self.settings.separator, cleaned);
        self.family.build_request(&self.settings.model, &prompt)
    }
}

impl LlmFlashcardGenerator<OpenAIClient> {
    /// Generator talking to the configured endpoint with `api_key`
    pub fn openai(api_key: impl Into<String>, config: &FlashcardsConfig) -> Self {
        Self::new(
            OpenAIClient::new(api_key, config.endpoint.clone()),
            GeneratorSettings::from_config(config),
        )
    }
}

#[async_trait]
impl<C: CompletionApi> FlashcardGenerator for LlmFlashcardGenerator<C> {
    async fn generate(&self, content: &str) -> GenerationResult<String> {
        if let Some(existing) = existing_flashcards(content) {
            debug!(
                existing = count_flashcards(existing, &self.settings.separator),
                "note already has flashcards"
            );
        }

        let request = self.build_request(content);
        debug!(
            model = %self.settings.model,
            family = ?self.family,
            "requesting flashcards"
        );

        let envelope = self.api.send(&request).await?;
        normalize(&envelope).inspect_err(|e| {
            error!(error = %e, response = ?envelope, "unusable completion response");
        })
    }
}
