//! Structured tracing events for graph execution.

use std::fmt::Debug;

use crate::error::AgentError;

use super::Next;

pub fn log_node_start<S: Debug>(node_id: &str, state: &S) {
    tracing::debug!(node_id = node_id, "Starting node execution");
    tracing::trace!(node_id = node_id, state = ?state, "Node input state");
}

pub fn log_node_complete(node_id: &str, next: &Next) {
    tracing::debug!(node_id = node_id, ?next, "Node execution complete");
}

pub fn log_graph_start(entry: &str) {
    tracing::info!(entry = entry, "Starting graph execution");
}

pub fn log_graph_complete(node_runs: usize) {
    tracing::info!(node_runs, "Graph execution complete");
}

pub fn log_graph_error(error: &AgentError) {
    tracing::error!(%error, "Graph execution error");
}
