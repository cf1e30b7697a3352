//! Compiled state graph: immutable, supports invoke only.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
};
use super::node_middleware::NodeMiddleware;
use super::state_graph::END;
use super::{Next, NextEntry, Node};

/// Node runs allowed per invoke unless the builder sets another limit.
pub const DEFAULT_RECURSION_LIMIT: usize = 100;

/// Runnable graph produced by `StateGraph::compile`.
///
/// Holds no per-run data, so one compiled graph may serve many concurrent invokes.
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) first_node_id: String,
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    pub(super) recursion_limit: usize,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Runs from the START node until a node ends the run or routing reaches END.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        log_graph_start(&self.first_node_id);
        match self.run_loop(state).await {
            Ok((state, node_runs)) => {
                log_graph_complete(node_runs);
                Ok(state)
            }
            Err(e) => {
                log_graph_error(&e);
                Err(e)
            }
        }
    }

    async fn run_loop(&self, mut state: S) -> Result<(S, usize), AgentError> {
        let mut current_id = self.first_node_id.clone();
        let mut node_runs = 0usize;
        loop {
            if node_runs >= self.recursion_limit {
                return Err(AgentError::ExecutionFailed(format!(
                    "recursion limit of {} node runs reached before END (at node `{}`)",
                    self.recursion_limit, current_id
                )));
            }
            let node = self.nodes.get(&current_id).cloned().ok_or_else(|| {
                AgentError::ExecutionFailed(format!("node not found: {}", current_id))
            })?;

            log_node_start(&current_id, &state);
            let (new_state, next) = self.run_node(node, state).await?;
            node_runs += 1;
            log_node_complete(&current_id, &next);
            state = new_state;

            match self.resolve_next(&current_id, next, &state) {
                Some(id) if id != END => current_id = id,
                _ => return Ok((state, node_runs)),
            }
        }
    }

    async fn run_node(&self, node: Arc<dyn Node<S>>, state: S) -> Result<(S, Next), AgentError> {
        match &self.middleware {
            Some(middleware) => {
                let node_id = node.id().to_string();
                middleware
                    .around_run(
                        &node_id,
                        state,
                        Box::new(move |s| Box::pin(async move { node.run(s).await })),
                    )
                    .await
            }
            None => node.run(state).await,
        }
    }

    fn resolve_next(&self, current_id: &str, next: Next, state: &S) -> Option<String> {
        match self.next_map.get(current_id) {
            Some(NextEntry::Conditional(router)) => {
                let target = router.resolve_next(state);
                tracing::debug!(from = %current_id, to = %target, "conditional routing");
                Some(target)
            }
            Some(NextEntry::Unconditional(to)) => match next {
                Next::Continue => Some(to.clone()),
                Next::Node(id) => Some(id),
                Next::End => None,
            },
            None => match next {
                Next::Node(id) => Some(id),
                Next::Continue | Next::End => None,
            },
        }
    }
}
