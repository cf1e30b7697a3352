//! Where handlers get their model clients from.
//!
//! Handlers never build provider clients themselves: they ask a [`ModelFactory`], so tests can
//! hand out scripted models and the server resolves credentials per request.

use std::sync::Arc;

use harper::{FallbackChat, LlmClient, LlmError, ModelClient, ProviderCredentials};

/// Builds the model behind each endpoint.
///
/// Errors are returned before any network I/O (missing key, unsupported model name).
pub trait ModelFactory: Send + Sync {
    /// Two-tier chat model for `/chat`.
    fn chat(&self) -> Result<Arc<dyn LlmClient>, LlmError>;

    /// Model named by a `/react` request.
    fn react(&self, model_name: &str) -> Result<Arc<dyn LlmClient>, LlmError>;
}

/// Real provider clients. Without fixed credentials the environment is read on every call,
/// so a key added later (or removed) takes effect without a restart.
#[derive(Debug, Clone, Default)]
pub struct ProviderModelFactory {
    credentials: Option<ProviderCredentials>,
}

impl ProviderModelFactory {
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: ProviderCredentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }

    fn credentials(&self) -> ProviderCredentials {
        self.credentials
            .clone()
            .unwrap_or_else(ProviderCredentials::from_env)
    }
}

impl ModelFactory for ProviderModelFactory {
    fn chat(&self) -> Result<Arc<dyn LlmClient>, LlmError> {
        Ok(Arc::new(FallbackChat::openai_default(&self.credentials())?))
    }

    fn react(&self, model_name: &str) -> Result<Arc<dyn LlmClient>, LlmError> {
        Ok(Arc::new(ModelClient::from_model_name(
            model_name,
            &self.credentials(),
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fail_before_io() {
        let factory = ProviderModelFactory::with_credentials(ProviderCredentials::default());
        assert!(matches!(
            factory.chat(),
            Err(LlmError::MissingCredential { env_var: "OPENAI_API_KEY", .. })
        ));
        assert!(matches!(
            factory.react("claude-3-haiku"),
            Err(LlmError::MissingCredential { env_var: "ANTHROPIC_API_KEY", .. })
        ));
        assert!(matches!(
            factory.react("llama-3"),
            Err(LlmError::UnsupportedModel(_))
        ));
    }

    #[test]
    fn keys_present_build_clients() {
        let factory = ProviderModelFactory::with_credentials(
            ProviderCredentials::default()
                .with_openai_key("sk-test")
                .with_anthropic_key("ak-test"),
        );
        assert_eq!(factory.react("gpt-4").unwrap().model_name(), "gpt-4");
        assert_eq!(
            factory.react("claude-3-haiku").unwrap().model_name(),
            "claude-3-haiku"
        );
        assert!(factory.chat().is_ok());
    }
}
