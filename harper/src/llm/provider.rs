//! Provider selection by model name and per-request credential resolution.
//!
//! `gpt*` models go to OpenAI, `claude*` models to Anthropic; any other name is rejected
//! before a client is built. Credentials are read when a client is requested, so a missing
//! key fails one request and never the process.

use std::fmt;

use async_openai::config::OpenAIConfig;
use async_trait::async_trait;

use crate::message::Message;

use super::{ChatAnthropic, ChatOpenAI, LlmClient, LlmError};

const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

/// Supported model provider families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Anthropic,
}

impl Provider {
    /// Provider for a model name, by prefix.
    pub fn for_model(model_name: &str) -> Result<Self, LlmError> {
        if model_name.starts_with("gpt") {
            Ok(Self::OpenAi)
        } else if model_name.starts_with("claude") {
            Ok(Self::Anthropic)
        } else {
            Err(LlmError::UnsupportedModel(model_name.to_string()))
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(self) -> &'static str {
        match self {
            Self::OpenAi => OPENAI_API_KEY,
            Self::Anthropic => ANTHROPIC_API_KEY,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => f.write_str("OpenAI"),
            Self::Anthropic => f.write_str("Anthropic"),
        }
    }
}

/// API keys and optional base URL overrides for each provider.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub anthropic_base_url: Option<String>,
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("anthropic_api_key", &self.anthropic_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("anthropic_base_url", &self.anthropic_base_url)
            .finish()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ProviderCredentials {
    /// Reads `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `OPENAI_BASE_URL`, `ANTHROPIC_BASE_URL`.
    /// Blank values count as unset.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: non_empty_env(OPENAI_API_KEY),
            anthropic_api_key: non_empty_env(ANTHROPIC_API_KEY),
            openai_base_url: non_empty_env("OPENAI_BASE_URL"),
            anthropic_base_url: non_empty_env("ANTHROPIC_BASE_URL"),
        }
    }

    pub fn with_openai_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    pub fn with_anthropic_key(mut self, key: impl Into<String>) -> Self {
        self.anthropic_api_key = Some(key.into());
        self
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = Some(url.into());
        self
    }

    pub fn with_anthropic_base_url(mut self, url: impl Into<String>) -> Self {
        self.anthropic_base_url = Some(url.into());
        self
    }

    /// The key for `provider`, or `MissingCredential`.
    pub fn api_key(&self, provider: Provider) -> Result<&str, LlmError> {
        let key = match provider {
            Provider::OpenAi => self.openai_api_key.as_deref(),
            Provider::Anthropic => self.anthropic_api_key.as_deref(),
        };
        key.ok_or(LlmError::MissingCredential {
            provider,
            env_var: provider.api_key_env(),
        })
    }

    /// `async-openai` config with the key and optional base URL applied.
    pub fn openai_config(&self) -> Result<OpenAIConfig, LlmError> {
        let mut config = OpenAIConfig::new().with_api_key(self.api_key(Provider::OpenAi)?);
        if let Some(base) = &self.openai_base_url {
            config = config.with_api_base(base.trim_end_matches('/'));
        }
        Ok(config)
    }
}

/// A model client for one provider, chosen once from the model name.
///
/// **Interaction**: Built per `/react` request; handed to `ReactRunner` as `Arc<dyn LlmClient>`.
pub enum ModelClient {
    OpenAi(ChatOpenAI),
    Anthropic(ChatAnthropic),
}

impl ModelClient {
    /// Resolves provider and credential; fails before any network I/O.
    pub fn from_model_name(
        model_name: &str,
        credentials: &ProviderCredentials,
    ) -> Result<Self, LlmError> {
        match Provider::for_model(model_name)? {
            Provider::OpenAi => Ok(Self::OpenAi(ChatOpenAI::with_config(
                credentials.openai_config()?,
                model_name,
            ))),
            Provider::Anthropic => {
                let key = credentials.api_key(Provider::Anthropic)?;
                let mut client = ChatAnthropic::new(key, model_name);
                if let Some(base) = &credentials.anthropic_base_url {
                    client = client.with_base_url(base.as_str());
                }
                Ok(Self::Anthropic(client))
            }
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            Self::OpenAi(_) => Provider::OpenAi,
            Self::Anthropic(_) => Provider::Anthropic,
        }
    }
}

#[async_trait]
impl LlmClient for ModelClient {
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LlmError> {
        match self {
            Self::OpenAi(client) => client.complete(messages, temperature).await,
            Self::Anthropic(client) => client.complete(messages, temperature).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Self::OpenAi(client) => client.model_name(),
            Self::Anthropic(client) => client.model_name(),
        }
    }
}
