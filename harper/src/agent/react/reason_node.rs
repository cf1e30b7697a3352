//! REASON: prompt the model with the transcript and record its reply.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompts::PromptBuilder;
use crate::state::ConversationState;

use super::REASON_NODE;

pub struct ReasonNode {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptBuilder>,
    temperature: f32,
}

impl ReasonNode {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptBuilder>, temperature: f32) -> Self {
        Self {
            llm,
            prompts,
            temperature,
        }
    }
}

fn apply_reasoning(mut state: ConversationState, reply: String) -> ConversationState {
    state.messages.push(Message::Assistant(reply));
    state.current_step += 1;
    state
}

#[async_trait]
impl Node<ConversationState> for ReasonNode {
    fn id(&self) -> &str {
        REASON_NODE
    }

    async fn run(
        &self,
        state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let prompt = self.prompts.reasoning(&state);
        debug!(
            step = state.current_step + 1,
            max_steps = state.max_steps,
            model = %self.llm.model_name(),
            "reasoning"
        );
        let reply = self
            .llm
            .complete(&[Message::user(prompt)], self.temperature)
            .await?;
        Ok((apply_reasoning(state, reply), Next::Continue))
    }
}
