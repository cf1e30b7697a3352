//! Graph compilation error.

use thiserror::Error;

/// Error returned by `StateGraph::compile` when the graph is not runnable.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// An edge or conditional source names a node that was never added.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge leaves START.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// Nothing can ever reach END.
    #[error("graph has no path to END")]
    MissingEnd,

    /// Two plain edges leave the same node (or START).
    #[error("ambiguous edges: {0}")]
    AmbiguousEdge(String),

    /// A node has both an outgoing edge and conditional edges.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A conditional path_map value is neither a node id nor END.
    #[error("conditional path_map invalid target: {0}")]
    InvalidConditionalPathMap(String),
}
