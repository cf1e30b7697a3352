//! Graph node trait: one step of a [`StateGraph`](super::StateGraph).

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;

use super::Next;

/// One step in a graph: state in, (state out, next step).
///
/// The state is moved into the node and a new value is moved out, so a node never aliases
/// state owned by another run.
///
/// **Interaction**: Registered with `StateGraph::add_node`; driven by
/// `CompiledStateGraph::invoke`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id (e.g. `"reason"`, `"act"`). Unique within a graph.
    fn id(&self) -> &str;

    /// Runs the step. Returning `Err` aborts the whole graph run.
    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;
}
