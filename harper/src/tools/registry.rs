//! Ordered tool registry.

use std::fmt;

use tracing::debug;

use super::{
    CalculatorTool, CurrentTimeTool, SearchSettings, SearchWebTool, Tool, ToolError, ToolSpec,
    WeatherLookupTool,
};

/// Tools in registration order. Built once at startup and shared read-only.
///
/// **Interaction**: Read by `PromptBuilder` (`list`) and `ActNode` (`invoke`).
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `search_web`, `calculator`, `get_current_time`, `weather_lookup`, in that order.
    pub fn with_builtin_tools(search: SearchSettings) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SearchWebTool::new(search)));
        registry.register(Box::new(CalculatorTool));
        registry.register(Box::new(CurrentTimeTool));
        registry.register(Box::new(WeatherLookupTool));
        registry
    }

    /// Adds a tool. A tool with the same name is replaced in place, keeping its position.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(i) => self.tools[i] = tool,
            None => self.tools.push(tool),
        }
    }

    /// Specs in registration order.
    pub fn list(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Runs the named tool. Errors from the tool itself are passed through untouched.
    pub async fn invoke(&self, name: &str, args: &str) -> Result<String, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        debug!(tool = name, "invoking tool");
        tool.call(args).await
    }
}
