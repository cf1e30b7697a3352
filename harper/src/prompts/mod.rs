//! Reasoning and final-answer prompts.
//!
//! Default templates live in `harper/prompts/*.txt` and are embedded at compile time.
//! Placeholders are `{tools}`, `{messages}`, `{current_step}`, `{max_steps}` and
//! `{tool_results}`. Substitution is a single pass over the template, so placeholder-like
//! text inside the conversation is never expanded.

use crate::message::Message;
use crate::state::ConversationState;
use crate::tools::{ToolRegistry, ToolSpec};

pub const DEFAULT_REASONING_TEMPLATE: &str = include_str!("../../prompts/reasoning.txt");
pub const DEFAULT_FINAL_ANSWER_TEMPLATE: &str = include_str!("../../prompts/final_answer.txt");

/// Renders prompts from templates plus the current state.
///
/// Built once at startup from the tool registry and shared read-only.
///
/// **Interaction**: Used by `ReasonNode` and `FinalAnswerNode`.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    reasoning_template: String,
    final_answer_template: String,
    tools_block: String,
}

impl PromptBuilder {
    /// Default templates advertising `tools`.
    pub fn new(tools: &[ToolSpec]) -> Self {
        Self {
            reasoning_template: DEFAULT_REASONING_TEMPLATE.trim_end().to_string(),
            final_answer_template: DEFAULT_FINAL_ANSWER_TEMPLATE.trim_end().to_string(),
            tools_block: render_tools(tools),
        }
    }

    pub fn from_registry(registry: &ToolRegistry) -> Self {
        Self::new(&registry.list())
    }

    pub fn with_reasoning_template(mut self, template: impl Into<String>) -> Self {
        self.reasoning_template = template.into();
        self
    }

    pub fn with_final_answer_template(mut self, template: impl Into<String>) -> Self {
        self.final_answer_template = template.into();
        self
    }

    /// Prompt for one REASON step. The step shown is the one about to run (1-based).
    pub fn reasoning(&self, state: &ConversationState) -> String {
        let messages = Message::render_transcript(&state.messages);
        let current_step = (state.current_step + 1).min(state.max_steps.max(1)).to_string();
        let max_steps = state.max_steps.to_string();
        render(
            &self.reasoning_template,
            &[
                ("tools", self.tools_block.as_str()),
                ("messages", messages.as_str()),
                ("current_step", current_step.as_str()),
                ("max_steps", max_steps.as_str()),
            ],
        )
    }

    /// Prompt for FINAL_ANSWER.
    pub fn final_answer(&self, state: &ConversationState) -> String {
        let messages = Message::render_transcript(&state.messages);
        let tool_results = render_tool_results(state);
        render(
            &self.final_answer_template,
            &[
                ("messages", messages.as_str()),
                ("tool_results", tool_results.as_str()),
            ],
        )
    }
}

fn render_tools(tools: &[ToolSpec]) -> String {
    if tools.is_empty() {
        return "(none)".to_string();
    }
    tools
        .iter()
        .map(|t| format!("- {}: {} (input: {})", t.name, t.description, t.input))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_tool_results(state: &ConversationState) -> String {
    if state.tool_results.is_empty() {
        return "(none)".to_string();
    }
    state
        .tool_results
        .iter()
        .map(|r| format!("- {}({}) -> {}", r.name, r.input, r.output))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replaces `{key}` placeholders that appear in `template` itself.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let hit = values.iter().find(|(key, _)| {
            after.starts_with(key) && after[key.len()..].starts_with('}')
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
