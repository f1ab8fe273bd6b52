//! Routing decision returned by a node: follow the declared edges, jump, or stop.

/// Next step after running a node.
///
/// - **Continue**: consult the graph's edges for the current node (no edge = end of graph).
/// - **Node(id)**: jump to the given node, ignoring declared edges. The id must be declared in
///   the graph, otherwise the run fails.
/// - **End**: stop after this node.
///
/// **Interaction**: Set on `NodeResult`; consumed by the engine's run loop.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum Next {
    #[default]
    Continue,
    Node(String),
    End,
}
