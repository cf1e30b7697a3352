//! OpenAI Chat Completions client (ChatOpenAI).
//!
//! Built on `async-openai`. Observation entries are sent as user turns. API errors are
//! classified into authentication, rate limit, or generic provider failures.

use std::time::Duration;

use async_openai::{
    config::{Config, OpenAIConfig},
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use tracing::{debug, trace};

use crate::message::Message;

use super::{LlmClient, LlmError, Provider};

/// Default API base (includes `/v1`, as `async-openai` expects).
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI Chat Completions client.
///
/// **Interaction**: Implements `LlmClient`; selected by `ModelClient` for `gpt*` models and used
/// as the secondary tier of `FallbackChat`.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    api_base: String,
    model: String,
    max_tokens: Option<u32>,
}

impl ChatOpenAI {
    /// Client for `model` with an explicit key against the default API base.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_config(OpenAIConfig::new().with_api_key(api_key), model)
    }

    /// Client with a custom config (key, base URL, organization).
    ///
    /// The client makes a single attempt per call: rate limits and server errors are
    /// returned to the caller instead of being retried with backoff.
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        let api_base = config.api_base().to_string();
        Self {
            client: Client::with_config(config).with_backoff(single_attempt()),
            api_base,
            model: model.into(),
            max_tokens: None,
        }
    }

    /// Caps completion length.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) | Message::Observation(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => ChatCompletionRequestMessage::Assistant(s.as_str().into()),
            })
            .collect()
    }
}

/// Backoff that gives up after the first failure.
fn single_attempt() -> backoff::ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

/// Maps `async-openai` errors onto the shared taxonomy.
fn classify_openai_error(err: OpenAIError) -> LlmError {
    let provider = Provider::OpenAi;
    match err {
        OpenAIError::ApiError(api) => {
            let code = api.code.as_ref().map(|c| c.to_string()).unwrap_or_default();
            let kind = api.r#type.clone().unwrap_or_default();
            let message = api.message;
            if code.contains("invalid_api_key")
                || kind.contains("authentication")
                || message.contains("Incorrect API key")
            {
                LlmError::Authentication { provider, message }
            } else if code.contains("rate_limit")
                || code.contains("insufficient_quota")
                || kind.contains("rate_limit")
                || kind.contains("insufficient_quota")
            {
                LlmError::RateLimited { provider, message }
            } else {
                LlmError::Provider { provider, message }
            }
        }
        other => LlmError::Provider {
            provider,
            message: other.to_string(),
        },
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LlmError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(messages));
        args.temperature(temperature);
        if let Some(max_tokens) = self.max_tokens {
            args.max_completion_tokens(max_tokens);
        }
        let request = args.build().map_err(|e| LlmError::Provider {
            provider: Provider::OpenAi,
            message: format!("request build failed: {}", e),
        })?;

        debug!(
            url = %self.api_base,
            model = %self.model,
            message_count = messages.len(),
            temperature,
            max_tokens = ?self.max_tokens,
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string(&request) {
            trace!(request = %js, "OpenAI request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(classify_openai_error)?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: Provider::OpenAi,
                message: "no choices".to_string(),
            })?;
        let content = choice.message.content.ok_or_else(|| LlmError::InvalidResponse {
            provider: Provider::OpenAi,
            message: "choice has no content".to_string(),
        })?;
        trace!(model = %self.model, content = %content, "OpenAI chat response");
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
