//! Content generator backed by an OpenAI-compatible chat completions API.

use crate::openai_compat::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat, prompt};
use crate::{ContentGenerator, GeneratorConfig};
use async_trait::async_trait;
use herald_core::{ContentBrief, GeneratedContent};
use herald_error::{GenerationError, GenerationErrorKind};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Generator for any API that speaks the OpenAI chat completions format.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleGenerator {
    client: Client,
    config: GeneratorConfig,
}

impl OpenAICompatibleGenerator {
    /// Creates a generator from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    #[instrument(skip(config), fields(model = %config.model()))]
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Http(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        debug!(url = %config.base_url(), "Created OpenAI-compatible generator");
        Ok(Self { client, config })
    }

    /// Returns the model name.
    pub fn model_name(&self) -> &str {
        self.config.model()
    }

    fn chat_request(&self, brief: &ContentBrief) -> Result<ChatRequest, GenerationError> {
        ChatRequest::builder()
            .model(self.config.model().clone())
            .messages(vec![
                ChatMessage::system(prompt::SYSTEM_PROMPT),
                ChatMessage::user(prompt::user_prompt(brief)),
            ])
            .temperature(self.config.temperature())
            .response_format(Some(ResponseFormat::json_object()))
            .build()
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::Http(format!(
                    "Failed to build request: {}",
                    e
                )))
            })
    }
}

#[async_trait]
impl ContentGenerator for OpenAICompatibleGenerator {
    #[instrument(skip(self, brief), fields(model = %self.config.model(), topic = %brief.topic()))]
    async fn generate(&self, brief: &ContentBrief) -> Result<GeneratedContent, GenerationError> {
        let start = Instant::now();
        let request = self.chat_request(brief)?;

        let response = self
            .client
            .post(self.config.base_url())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Generation request failed");
                if e.is_timeout() {
                    GenerationError::new(GenerationErrorKind::Timeout)
                } else {
                    GenerationError::new(GenerationErrorKind::Http(e.to_string()))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "Generation API error");
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse generation response");
            if e.is_timeout() {
                GenerationError::new(GenerationErrorKind::Timeout)
            } else {
                GenerationError::new(GenerationErrorKind::MalformedOutput(format!(
                    "Failed to parse JSON: {}",
                    e
                )))
            }
        })?;

        let answer = chat
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::MalformedOutput(
                    "No choices in response".to_string(),
                ))
            })?;

        let content = prompt::parse_generated(answer)?;
        info!(
            duration_ms = start.elapsed().as_millis(),
            completion_tokens = ?chat.usage.as_ref().and_then(|u| u.completion_tokens),
            title = %content.title(),
            "Content generated"
        );
        Ok(content)
    }

    fn name(&self) -> &str {
        "openai_compat"
    }
}
