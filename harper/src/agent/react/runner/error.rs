//! Error type for ReactRunner.

use crate::error::AgentError;
use crate::graph::CompilationError;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("compilation failed: {0}")]
    Compilation(#[from] CompilationError),
    #[error("{0}")]
    Execution(#[from] AgentError),
    #[error("graph ended without a final answer")]
    MissingFinalAnswer,
}
