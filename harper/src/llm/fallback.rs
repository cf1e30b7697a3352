//! Two-tier chat: the primary model first, the secondary only if the primary fails.
//!
//! Not a retry. Each tier is attempted at most once; when both fail the error carries both
//! messages and the secondary's classification.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::message::Message;

use super::{
    ChatOpenAI, LlmClient, LlmError, OpenAiResponses, Provider, ProviderCredentials,
};

pub const PRIMARY_CHAT_MODEL: &str = "gpt-5";
pub const SECONDARY_CHAT_MODEL: &str = "gpt-4";
const PRIMARY_REASONING_EFFORT: &str = "minimal";
const SECONDARY_MAX_TOKENS: u32 = 1000;

/// Primary + secondary chat tiers.
///
/// **Interaction**: Built per `/chat` request by the server's model factory.
pub struct FallbackChat {
    primary: Arc<dyn LlmClient>,
    primary_label: String,
    secondary: Arc<dyn LlmClient>,
    secondary_label: String,
}

impl FallbackChat {
    pub fn new(primary: Arc<dyn LlmClient>, secondary: Arc<dyn LlmClient>) -> Self {
        let primary_label = primary.model_name().to_string();
        let secondary_label = secondary.model_name().to_string();
        Self {
            primary,
            primary_label,
            secondary,
            secondary_label,
        }
    }

    /// Names used in the combined error message.
    pub fn with_labels(
        mut self,
        primary_label: impl Into<String>,
        secondary_label: impl Into<String>,
    ) -> Self {
        self.primary_label = primary_label.into();
        self.secondary_label = secondary_label.into();
        self
    }

    /// `gpt-5` on the Responses API (minimal reasoning), then `gpt-4` chat completions
    /// capped at 1000 tokens. Needs the OpenAI key.
    pub fn openai_default(credentials: &ProviderCredentials) -> Result<Self, LlmError> {
        let key = credentials.api_key(Provider::OpenAi)?;
        let mut primary = OpenAiResponses::new(key, PRIMARY_CHAT_MODEL)
            .with_reasoning_effort(PRIMARY_REASONING_EFFORT);
        if let Some(base) = &credentials.openai_base_url {
            primary = primary.with_base_url(base.as_str());
        }
        let secondary = ChatOpenAI::with_config(credentials.openai_config()?, SECONDARY_CHAT_MODEL)
            .with_max_tokens(SECONDARY_MAX_TOKENS);
        Ok(Self::new(Arc::new(primary), Arc::new(secondary))
            .with_labels("GPT-5 responses API", "GPT-4"))
    }
}

#[async_trait]
impl LlmClient for FallbackChat {
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LlmError> {
        let primary_err = match self.primary.complete(messages, temperature).await {
            Ok(text) => return Ok(text),
            Err(e) => e,
        };
        warn!(
            tier = %self.primary_label,
            error = %primary_err,
            fallback = %self.secondary_label,
            "primary chat tier failed, trying fallback"
        );
        match self.secondary.complete(messages, temperature).await {
            Ok(text) => {
                info!(tier = %self.secondary_label, "fallback chat tier succeeded");
                Ok(text)
            }
            Err(secondary_err) => Err(LlmError::FallbackExhausted {
                primary_label: self.primary_label.clone(),
                primary: Box::new(primary_err),
                secondary_label: self.secondary_label.clone(),
                secondary: Box::new(secondary_err),
            }),
        }
    }

    fn model_name(&self) -> &str {
        &self.primary_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockFailure, MockLlm, DEFAULT_TEMPERATURE};

    /// **Scenario**: Primary success never touches the secondary.
    #[tokio::test]
    async fn primary_success_skips_secondary() {
        let primary = Arc::new(MockLlm::with_reply("from primary"));
        let secondary = Arc::new(MockLlm::with_reply("from secondary"));
        let chat = FallbackChat::new(primary.clone(), secondary.clone());
        let out = chat
            .complete(&[Message::user("hello")], DEFAULT_TEMPERATURE)
            .await
            .unwrap();
        assert_eq!(out, "from primary");
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 0);
    }

    /// **Scenario**: Primary failure falls back exactly once.
    #[tokio::test]
    async fn primary_failure_uses_secondary_once() {
        let primary = Arc::new(MockLlm::failing(MockFailure::Provider("boom".into())));
        let secondary = Arc::new(MockLlm::with_reply("from secondary"));
        let chat = FallbackChat::new(primary.clone(), secondary.clone());
        let out = chat
            .complete(&[Message::user("hello")], DEFAULT_TEMPERATURE)
            .await
            .unwrap();
        assert_eq!(out, "from secondary");
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 1);
    }

    /// **Scenario**: Both failing yields FallbackExhausted with both messages.
    #[tokio::test]
    async fn both_fail_combined_error() {
        let primary = Arc::new(MockLlm::failing(MockFailure::Provider("primary down".into())));
        let secondary = Arc::new(MockLlm::failing(MockFailure::Authentication));
        let chat = FallbackChat::new(primary, secondary).with_labels("GPT-5 responses API", "GPT-4");
        let err = chat
            .complete(&[Message::user("hello")], DEFAULT_TEMPERATURE)
            .await
            .unwrap_err();
        let s = err.to_string();
        assert!(s.contains("primary down"), "{}", s);
        assert!(s.contains("GPT-4"), "{}", s);
        assert_eq!(err.kind(), crate::llm::LlmErrorKind::Authentication);
    }

    /// **Scenario**: The default pair needs the OpenAI key.
    #[test]
    fn openai_default_requires_key() {
        assert!(matches!(
            FallbackChat::openai_default(&ProviderCredentials::default()),
            Err(LlmError::MissingCredential { .. })
        ));
        assert!(FallbackChat::openai_default(&ProviderCredentials::default().with_openai_key("k")).is_ok());
    }
}
