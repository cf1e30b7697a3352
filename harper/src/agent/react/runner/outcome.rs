//! Caller-facing result of a finished run.

use serde::Serialize;

use crate::state::ConversationState;

use super::RunError;

/// Final answer plus the model's reasoning per iteration and the tools it used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactOutcome {
    pub answer: String,
    pub reasoning_steps: Vec<String>,
    pub tools_used: Vec<String>,
}

impl TryFrom<ConversationState> for ReactOutcome {
    type Error = RunError;

    fn try_from(state: ConversationState) -> Result<Self, Self::Error> {
        let reasoning_steps = state.reasoning_steps();
        let tools_used = state.tools_used();
        let answer = state.final_answer.ok_or(RunError::MissingFinalAnswer)?;
        Ok(Self {
            answer,
            reasoning_steps,
            tools_used,
        })
    }
}
