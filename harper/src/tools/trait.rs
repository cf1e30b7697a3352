use async_trait::async_trait;

use super::ToolError;

/// What a tool advertises to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSpec {
    /// Unique name; used in prompts and for dispatch.
    pub name: String,
    /// Shown to the model.
    pub description: String,
    /// What the argument text should contain (e.g. `arithmetic expression`, `none`).
    pub input: String,
}

/// A single tool the model can request.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use harper::tools::{Tool, ToolError, ToolSpec};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Tool for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec {
///             name: "echo".to_string(),
///             description: "Repeat the input".to_string(),
///             input: "any text".to_string(),
///         }
///     }
///
///     async fn call(&self, args: &str) -> Result<String, ToolError> {
///         Ok(args.to_string())
///     }
/// }
/// ```
///
/// # Interaction
///
/// - **ToolRegistry**: stores tools in registration order and dispatches by name.
/// - **PromptBuilder**: renders `spec()` of every registered tool into the reasoning prompt.
/// - **ActNode**: calls `ToolRegistry::invoke` with the parsed name and argument text.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn spec(&self) -> ToolSpec;

    /// Runs the tool. Expected failures belong in the `Ok` text; `Err` is a contract violation.
    async fn call(&self, args: &str) -> Result<String, ToolError>;
}
