//! Routing hint returned by a node.

/// What a node asks the runner to do next.
///
/// Nodes with conditional edges have their hint ignored; the router decides instead.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    /// Follow the node's outgoing edge.
    Continue,
    /// Jump to the node with this id.
    Node(String),
    /// Stop and return the current state.
    End,
}
