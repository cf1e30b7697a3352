//! State graph: nodes, fixed and conditional edges, compile and invoke.
//!
//! Build a [`StateGraph`] with `add_node` / `add_edge` / `add_conditional_edges`, then
//! `compile` it into a [`CompiledStateGraph`] and `invoke` it with an initial state. Each node
//! takes the state by value and returns the next state plus a [`Next`] hint.

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod logging_middleware;
mod next;
mod node;
mod node_middleware;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::{CompiledStateGraph, DEFAULT_RECURSION_LIMIT};
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
};
pub use logging_middleware::{LoggingNodeMiddleware, WithNodeLogging};
pub use next::Next;
pub use node::Node;
pub use node_middleware::{NodeMiddleware, NodeRunFn};
pub use state_graph::{StateGraph, END, START};
