//! Tool dispatch errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolError {
    /// No tool with this name is registered. ACT turns this into an observation.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The tool returned an error instead of describing the failure in its output.
    #[error("tool `{tool}` violated its contract: {message}")]
    ContractViolation { tool: String, message: String },
}
