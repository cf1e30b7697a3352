//! Agent execution error.
//!
//! Returned by graph nodes when a step cannot complete. Model failures and tool contract
//! violations end the run; unknown tools never get here (ACT turns them into observations).

use thiserror::Error;

use crate::llm::LlmError;
use crate::tools::ToolError;

/// Error raised while running the agent graph.
///
/// **Interaction**: Returned by `Node::run` and `CompiledStateGraph::invoke`; wrapped by
/// `RunError::Execution` at the runner boundary.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The model call inside REASON or FINAL_ANSWER failed. Not retried.
    #[error("model invocation failed: {0}")]
    Llm(#[from] LlmError),

    /// A tool returned an error instead of reporting its failure as text.
    #[error("tool failure: {0}")]
    Tool(ToolError),

    /// Graph-level failure (missing node, bad routing target).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
