//! Plan types shared by the strategies and the runner.

/// One mutation applied to the graph under test.
///
/// Vertex and edge selectors are raw hints; the runner reduces them modulo
/// the live vertex or edge count so every generated plan stays applicable.
#[derive(Clone, Debug)]
pub(super) enum Operation {
    AddEdge {
        source: usize,
        target: usize,
        weight: u64,
        active: bool,
    },
    Activate {
        pick: usize,
    },
    Deactivate {
        pick: usize,
    },
    AddNode,
}

/// A starting vertex count plus the operations to replay.
#[derive(Clone, Debug)]
pub(super) struct MutationPlan {
    pub(super) initial_vertices: usize,
    pub(super) operations: Vec<Operation>,
}
