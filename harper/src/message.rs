//! Conversation transcript entries.
//!
//! The transcript is fed back into every prompt, so insertion order matters. Tool results are
//! kept as their own `Observation` role; providers that only know user/assistant receive them
//! as user turns.

use serde::{Deserialize, Serialize};

/// One role-tagged entry in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "snake_case")]
pub enum Message {
    System(String),
    User(String),
    Assistant(String),
    /// Tool output (or a tool dispatch failure) appended by ACT.
    Observation(String),
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    pub fn observation(content: impl Into<String>) -> Self {
        Self::Observation(content.into())
    }

    /// Role label used in rendered transcripts.
    pub fn role(&self) -> &'static str {
        match self {
            Self::System(_) => "system",
            Self::User(_) => "user",
            Self::Assistant(_) => "assistant",
            Self::Observation(_) => "observation",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) | Self::Assistant(s) | Self::Observation(s) => s,
        }
    }

    /// Renders messages one per line as `role: content`.
    pub fn render_transcript(messages: &[Message]) -> String {
        messages
            .iter()
            .map(|m| format!("{}: {}", m.role(), m.content()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
