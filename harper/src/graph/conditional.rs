//! Conditional edges: pick the next node from the state after the source node runs.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Routing function: `(state) -> key`. Must not mutate anything.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Routing function plus optional key -> node id map.
///
/// With a path map, the key is looked up and falls back to itself when absent; without one,
/// the key is the node id (or END).
#[derive(Clone)]
pub struct ConditionalRouter<S> {
    pub(super) path: ConditionalRouterFn<S>,
    pub(super) path_map: Option<HashMap<String, String>>,
}

impl<S> ConditionalRouter<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self { path, path_map }
    }

    /// Next node id (or END) for this state.
    pub fn resolve_next(&self, state: &S) -> String {
        let key = (self.path)(state);
        match self.path_map.as_ref().and_then(|m| m.get(&key)) {
            Some(target) => target.clone(),
            None => key,
        }
    }
}

/// How the compiled graph leaves a node.
#[derive(Clone)]
pub enum NextEntry<S> {
    /// Fixed edge; the node's own `Next` can still end early or jump.
    Unconditional(String),
    /// Router decides from state; the node's `Next` is ignored.
    Conditional(ConditionalRouter<S>),
}
