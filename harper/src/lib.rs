//! # Harper
//!
//! A bounded ReAct agent: the model alternates between reasoning text and tool calls for a
//! fixed number of iterations, then writes a final answer. The loop is a small state graph
//! (state in, state out) with four nodes:
//!
//! ```text
//! START -> decide -> reason -> act -> decide -> ... -> final_answer -> END
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`], conditional edges
//!   and node middleware.
//! - [`agent`]: the ReAct nodes, the [`ToolCallParser`](agent::react::ToolCallParser) and
//!   [`ReactRunner`](agent::react::ReactRunner).
//! - [`llm`]: [`LlmClient`] trait, provider clients ([`ChatOpenAI`], [`OpenAiResponses`],
//!   [`ChatAnthropic`]), [`ModelClient`] selection by model name, [`FallbackChat`] and
//!   [`MockLlm`].
//! - [`tools`]: [`Tool`] trait, [`ToolRegistry`] and the built-in tools.
//! - [`prompts`]: [`PromptBuilder`] for the reasoning and final-answer prompts.
//! - [`state`]: [`ConversationState`] and [`ToolRecord`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use harper::{AgentConfig, MockLlm, PromptBuilder, ReactRunner, SearchSettings, ToolRegistry};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tools = Arc::new(ToolRegistry::with_builtin_tools(SearchSettings::from_env()));
//! let prompts = Arc::new(PromptBuilder::from_registry(&tools));
//! let llm = Arc::new(MockLlm::with_replies(["Tool: calculator: 2+2", "The answer is 4."]));
//! let runner = ReactRunner::new(llm, tools, prompts, AgentConfig::default().with_max_iterations(1))?;
//! let outcome = runner.run("What is 2+2?").await?;
//! println!("{}", outcome.answer);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod prompts;
pub mod state;
pub mod tools;

pub use agent::react::{
    AgentConfig, ReactOutcome, ReactRunner, RunError, ToolCall, ToolCallParser,
};
pub use error::AgentError;
pub use graph::{CompilationError, CompiledStateGraph, Next, Node, StateGraph, END, START};
pub use llm::{
    ChatAnthropic, ChatOpenAI, FallbackChat, LlmClient, LlmError, LlmErrorKind, MockFailure,
    MockLlm, ModelClient, OpenAiResponses, Provider, ProviderCredentials,
};
pub use message::Message;
pub use prompts::PromptBuilder;
pub use state::{ConversationState, ToolRecord};
pub use tools::{SearchSettings, Tool, ToolError, ToolRegistry, ToolSpec};
