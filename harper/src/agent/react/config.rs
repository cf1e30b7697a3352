//! Per-run agent configuration.

use crate::llm::DEFAULT_TEMPERATURE;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_MAX_ITERATIONS: u32 = 3;

/// Fixed for the lifetime of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub model_name: String,
    pub temperature: f32,
    /// Number of REASON/ACT cycles before the final answer.
    pub max_iterations: u32,
    /// End early when the model writes `FINAL_ANSWER:` without calling a tool.
    /// Off by default: the run always does `max_iterations` cycles.
    pub stop_on_final_answer: bool,
    /// Attach node enter/exit logging middleware.
    pub node_logging: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            stop_on_final_answer: false,
            node_logging: false,
        }
    }
}

impl AgentConfig {
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_stop_on_final_answer(mut self, stop: bool) -> Self {
        self.stop_on_final_answer = stop;
        self
    }

    pub fn with_node_logging(mut self, enabled: bool) -> Self {
        self.node_logging = enabled;
        self
    }
}
