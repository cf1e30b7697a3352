//! Conversation state for one agent run.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// One successful tool execution: `(tool_name, input, output)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRecord {
    pub name: String,
    pub input: String,
    pub output: String,
}

/// Mutable context of one ReAct run.
///
/// - `messages`: transcript (user, assistant, observation), fed back into every prompt.
/// - `current_step`: number of REASON iterations so far; never exceeds `max_steps`.
/// - `tool_results`: append-only, one entry per successful tool execution.
/// - `final_answer`: set once, by FINAL_ANSWER.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub current_step: u32,
    pub max_steps: u32,
    pub tool_results: Vec<ToolRecord>,
    pub final_answer: Option<String>,
}

impl ConversationState {
    /// Fresh state seeded with the query as the only user message.
    pub fn new(query: impl Into<String>, max_steps: u32) -> Self {
        Self {
            messages: vec![Message::user(query)],
            current_step: 0,
            max_steps,
            tool_results: Vec::new(),
            final_answer: None,
        }
    }

    /// Content of the most recent assistant entry, if any.
    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| match m {
            Message::Assistant(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// True when the newest transcript entry is an assistant message.
    pub fn ends_with_assistant(&self) -> bool {
        matches!(self.messages.last(), Some(Message::Assistant(_)))
    }

    /// Every assistant entry in order (the model's reasoning for each iteration).
    pub fn reasoning_steps(&self) -> Vec<String> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Assistant(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    /// Tool names from `tool_results`, de-duplicated, in first-use order.
    pub fn tools_used(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for record in &self.tool_results {
            if !names.iter().any(|n| n == &record.name) {
                names.push(record.name.clone());
            }
        }
        names
    }
}
