//! LLM client abstraction for the ReAct nodes and the chat endpoint.
//!
//! [`LlmClient::complete`] is the only seam: messages in, assistant text out. Implementations:
//!
//! - [`ChatOpenAI`]: OpenAI Chat Completions via `async-openai`.
//! - [`OpenAiResponses`]: OpenAI Responses API (reasoning models) via `reqwest`.
//! - [`ChatAnthropic`]: Anthropic Messages API via `reqwest`.
//! - [`ModelClient`]: one of the above, chosen by model name.
//! - [`FallbackChat`]: primary tier, then secondary tier, each tried once.
//! - [`MockLlm`]: scripted replies for tests.

mod anthropic;
mod error;
mod fallback;
mod http;
mod mock;
mod openai;
mod provider;
mod responses;

use async_trait::async_trait;

use crate::message::Message;

pub use anthropic::{ChatAnthropic, ANTHROPIC_VERSION, DEFAULT_ANTHROPIC_BASE_URL};
pub use error::{LlmError, LlmErrorKind};
pub use fallback::FallbackChat;
pub use mock::{MockFailure, MockLlm};
pub use openai::{ChatOpenAI, DEFAULT_OPENAI_BASE_URL};
pub use provider::{ModelClient, Provider, ProviderCredentials};
pub use responses::OpenAiResponses;

/// Sampling temperature used by the agent and the chat fallback tier unless overridden.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Sends a message list to a model and returns the assistant's text.
///
/// Implementations must not retry; callers decide what a failure means.
///
/// **Interaction**: Used by `ReasonNode` and `FinalAnswerNode`; wrapped by `FallbackChat`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, messages: &[Message], temperature: f32) -> Result<String, LlmError>;

    /// Model name for logs.
    fn model_name(&self) -> &str;
}
