//! DECIDE: routing point between REASON and FINAL_ANSWER. Never changes state.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::state::ConversationState;

use super::{final_answer_marker, ToolCallParser, DECIDE_NODE, FINAL_ANSWER_NODE, REASON_NODE};

pub struct DecideNode;

#[async_trait]
impl Node<ConversationState> for DecideNode {
    fn id(&self) -> &str {
        DECIDE_NODE
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        Ok((state, Next::Continue))
    }
}

/// Where to go after DECIDE.
///
/// `current_step < max_steps` goes back to REASON. With `stop_on_final_answer`, a latest
/// reply that carries `FINAL_ANSWER:` and no tool call ends the loop early.
pub fn route_after_decide(state: &ConversationState, stop_on_final_answer: bool) -> &'static str {
    if state.current_step >= state.max_steps {
        return FINAL_ANSWER_NODE;
    }
    if stop_on_final_answer && state.ends_with_assistant() {
        if let Some(reply) = state.last_assistant_reply() {
            if final_answer_marker(reply).is_some() && ToolCallParser::parse(reply).is_none() {
                return FINAL_ANSWER_NODE;
            }
        }
    }
    REASON_NODE
}
