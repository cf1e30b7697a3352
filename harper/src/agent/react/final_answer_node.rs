//! FINAL_ANSWER: one last model call over the whole transcript and the tool results.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompts::PromptBuilder;
use crate::state::ConversationState;

use super::FINAL_ANSWER_NODE;

pub struct FinalAnswerNode {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<PromptBuilder>,
    temperature: f32,
}

impl FinalAnswerNode {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<PromptBuilder>, temperature: f32) -> Self {
        Self {
            llm,
            prompts,
            temperature,
        }
    }
}

#[async_trait]
impl Node<ConversationState> for FinalAnswerNode {
    fn id(&self) -> &str {
        FINAL_ANSWER_NODE
    }

    async fn run(
        &self,
        mut state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let prompt = self.prompts.final_answer(&state);
        debug!(
            steps = state.current_step,
            tool_results = state.tool_results.len(),
            "writing final answer"
        );
        let answer = self
            .llm
            .complete(&[Message::user(prompt)], self.temperature)
            .await?;
        state.final_answer = Some(answer);
        Ok((state, Next::End))
    }
}
