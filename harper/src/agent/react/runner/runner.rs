//! ReactRunner: compiled ReAct graph, invoke and run.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::agent::react::{
    route_after_decide, ActNode, AgentConfig, DecideNode, FinalAnswerNode, ReasonNode, ACT_NODE,
    DECIDE_NODE, FINAL_ANSWER_NODE, REASON_NODE,
};
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, WithNodeLogging, END, START};
use crate::llm::LlmClient;
use crate::prompts::PromptBuilder;
use crate::state::ConversationState;
use crate::tools::ToolRegistry;

use super::{ReactOutcome, RunError};

/// The agent loop for one model and one config.
///
/// Graph: `START -> decide`, `decide -> reason | final_answer`, `reason -> act`,
/// `act -> decide`, `final_answer -> END`. A runner holds no per-run state; each `invoke`
/// starts from a fresh [`ConversationState`].
///
/// **Interaction**: Built per `/react` request with the request's model client and the shared
/// registry and prompts.
pub struct ReactRunner {
    compiled: CompiledStateGraph<ConversationState>,
    config: AgentConfig,
}

impl ReactRunner {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: Arc<ToolRegistry>,
        prompts: Arc<PromptBuilder>,
        config: AgentConfig,
    ) -> Result<Self, CompilationError> {
        let reason = ReasonNode::new(Arc::clone(&llm), Arc::clone(&prompts), config.temperature);
        let act = ActNode::new(tools);
        let final_answer = FinalAnswerNode::new(llm, prompts, config.temperature);

        let decide_path_map: HashMap<String, String> = [
            (REASON_NODE.to_string(), REASON_NODE.to_string()),
            (FINAL_ANSWER_NODE.to_string(), FINAL_ANSWER_NODE.to_string()),
        ]
        .into_iter()
        .collect();
        let stop_on_final_answer = config.stop_on_final_answer;

        // decide runs max+1 times, reason and act max times each, then final_answer once.
        let node_runs = (config.max_iterations as usize)
            .saturating_mul(3)
            .saturating_add(2);

        let mut graph = StateGraph::<ConversationState>::new().with_recursion_limit(node_runs);
        graph
            .add_node(DECIDE_NODE, Arc::new(DecideNode))
            .add_node(REASON_NODE, Arc::new(reason))
            .add_node(ACT_NODE, Arc::new(act))
            .add_node(FINAL_ANSWER_NODE, Arc::new(final_answer))
            .add_edge(START, DECIDE_NODE)
            .add_conditional_edges(
                DECIDE_NODE,
                Arc::new(move |state: &ConversationState| {
                    route_after_decide(state, stop_on_final_answer).to_string()
                }),
                Some(decide_path_map),
            )
            .add_edge(REASON_NODE, ACT_NODE)
            .add_edge(ACT_NODE, DECIDE_NODE)
            .add_edge(FINAL_ANSWER_NODE, END);

        let graph = if config.node_logging {
            graph.with_node_logging()
        } else {
            graph
        };

        Ok(Self {
            compiled: graph.compile()?,
            config,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Runs the loop for `query` and returns the final state.
    pub async fn invoke(&self, query: &str) -> Result<ConversationState, RunError> {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "react_run",
            run_id = %run_id,
            model = %self.config.model_name,
            max_iterations = self.config.max_iterations
        );
        async {
            let state = ConversationState::new(query, self.config.max_iterations);
            let final_state = self.compiled.invoke(state).await?;
            if final_state.final_answer.is_none() {
                return Err(RunError::MissingFinalAnswer);
            }
            info!(
                steps = final_state.current_step,
                tool_calls = final_state.tool_results.len(),
                "react run complete"
            );
            Ok(final_state)
        }
        .instrument(span)
        .await
    }

    /// Runs the loop and returns answer, reasoning steps and tools used.
    pub async fn run(&self, query: &str) -> Result<ReactOutcome, RunError> {
        ReactOutcome::try_from(self.invoke(query).await?)
    }
}
