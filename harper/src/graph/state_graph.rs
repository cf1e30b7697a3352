//! State graph builder: nodes, plain edges and conditional edges.
//!
//! A node leaves through exactly one plain edge or one set of conditional edges. Cycles are
//! allowed (the ReAct loop is one); the compiled graph bounds them with a recursion limit.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use super::compile_error::CompilationError;
use super::compiled::{CompiledStateGraph, DEFAULT_RECURSION_LIMIT};
use super::conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
use super::node::Node;
use super::node_middleware::NodeMiddleware;

/// Entry sentinel: `add_edge(START, first_node)`.
pub const START: &str = "__start__";

/// Exit sentinel: `add_edge(last_node, END)` or a router returning `END`.
pub const END: &str = "__end__";

/// Graph under construction. Call [`compile`](Self::compile) to get something runnable.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    edges: Vec<(String, String)>,
    conditional_edges: HashMap<String, ConditionalRouter<S>>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    recursion_limit: usize,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: Vec::new(),
            conditional_edges: HashMap::new(),
            middleware: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Wraps every node run with `middleware`.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Maximum node runs per invoke before the run is aborted.
    pub fn with_recursion_limit(self, recursion_limit: usize) -> Self {
        Self {
            recursion_limit,
            ..self
        }
    }

    /// Adds (or replaces) a node.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Adds a plain edge. Use [`START`] and [`END`] for entry and exit.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to_id: impl Into<String>) -> &mut Self {
        self.edges.push((from_id.into(), to_id.into()));
        self
    }

    /// After `source` runs, `path(state)` picks the next node, optionally through `path_map`.
    ///
    /// ```rust,ignore
    /// graph.add_conditional_edges(
    ///     "decide",
    ///     Arc::new(|s: &ConversationState| route(s).to_string()),
    ///     Some([("reason".into(), "reason".into()), ("final".into(), "final_answer".into())]
    ///         .into_iter()
    ///         .collect()),
    /// );
    /// ```
    pub fn add_conditional_edges(
        &mut self,
        source: impl Into<String>,
        path: ConditionalRouterFn<S>,
        path_map: Option<HashMap<String, String>>,
    ) -> &mut Self {
        self.conditional_edges
            .insert(source.into(), ConditionalRouter::new(path, path_map));
        self
    }

    /// Validates the graph and freezes it.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let known = |id: &str| self.nodes.contains_key(id);

        for (from, to) in &self.edges {
            if from != START && !known(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if to != END && !known(to) {
                return Err(CompilationError::NodeNotFound(to.clone()));
            }
        }
        for (source, router) in &self.conditional_edges {
            if !known(source) {
                return Err(CompilationError::NodeNotFound(source.clone()));
            }
            if let Some(path_map) = &router.path_map {
                if let Some(bad) = path_map.values().find(|t| *t != END && !known(t)) {
                    return Err(CompilationError::InvalidConditionalPathMap(bad.clone()));
                }
            }
        }

        let mut seen_from = HashSet::new();
        for (from, _) in &self.edges {
            if !seen_from.insert(from.as_str()) {
                return Err(CompilationError::AmbiguousEdge(format!(
                    "more than one edge from {}",
                    from
                )));
            }
        }
        let first = self
            .edges
            .iter()
            .find(|(f, _)| f == START)
            .map(|(_, t)| t.clone())
            .ok_or(CompilationError::MissingStart)?;
        if let Some(source) = self
            .conditional_edges
            .keys()
            .find(|s| seen_from.contains(s.as_str()))
        {
            return Err(CompilationError::NodeHasBothEdgeAndConditional(
                source.clone(),
            ));
        }

        // A router without a path map may return END at runtime.
        let reaches_end = self.edges.iter().any(|(_, t)| t == END)
            || self.conditional_edges.values().any(|r| {
                r.path_map
                    .as_ref()
                    .map_or(true, |m| m.values().any(|v| v == END))
            });
        if !reaches_end {
            return Err(CompilationError::MissingEnd);
        }

        let mut next_map: HashMap<String, NextEntry<S>> = self
            .edges
            .into_iter()
            .filter(|(f, _)| f != START)
            .map(|(f, t)| (f, NextEntry::Unconditional(t)))
            .collect();
        for (source, router) in self.conditional_edges {
            next_map.insert(source, NextEntry::Conditional(router));
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            first_node_id: first,
            next_map,
            middleware: self.middleware,
            recursion_limit: self.recursion_limit,
        })
    }
}
