//! Construction options and the builder for [`IncrementalGraph`] instances.

use std::{fmt::Debug, hash::Hash};

use crate::{EdgeSpec, IncrementalGraph, Result, Weight, WeightFn};

/// Switches fixed when an [`IncrementalGraph`] is constructed.
///
/// # Examples
/// ```
/// use linkwise_core::GraphOptions;
///
/// let options = GraphOptions {
///     union_find: true,
///     ..GraphOptions::default()
/// };
/// assert!(options.tracks_components());
/// assert!(!GraphOptions { directed: true, ..options }.tracks_components());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Join every pair of initial vertices, and every later vertex to all
    /// existing ones, with an edge weighted by the weight function.
    pub autojoin: bool,
    /// Maintain the component partition as edges toggle.
    pub union_find: bool,
    /// Active state for edges that do not specify one.
    pub default_active: bool,
    /// Store edges one-directionally. Disables component tracking.
    pub directed: bool,
}

impl GraphOptions {
    /// Whether component queries are answerable under these options.
    #[must_use]
    pub const fn tracks_components(&self) -> bool {
        self.union_find && !self.directed
    }
}

/// Configures and constructs [`IncrementalGraph`] instances.
///
/// # Examples
/// ```
/// use linkwise_core::{EdgeSpec, GraphBuilder};
///
/// fn gap(a: &i64, b: &i64) -> i64 {
///     (a - b).abs()
/// }
///
/// let graph = GraphBuilder::new(gap as fn(&i64, &i64) -> i64)
///     .with_vertices([1, 4, 9])
///     .with_edge(EdgeSpec::new(1, 4).with_active(true))
///     .with_union_find(true)
///     .build()
///     .expect("vertices are distinct");
/// assert_eq!(graph.component_count(), Ok(2));
/// assert_eq!(graph.edge_weight(&4, &1), Ok(3));
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder<V, W> {
    vertices: Vec<V>,
    edges: Vec<EdgeSpec<V, W>>,
    weight_fn: WeightFn<V, W>,
    options: GraphOptions,
}

impl<V, W> GraphBuilder<V, W>
where
    V: Clone + Eq + Hash + Debug,
    W: Weight,
{
    /// Creates a builder with no vertices, no edges and default options.
    #[must_use]
    pub fn new(weight_fn: WeightFn<V, W>) -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            weight_fn,
            options: GraphOptions::default(),
        }
    }

    /// Appends initial vertices.
    #[must_use]
    pub fn with_vertices(mut self, vertices: impl IntoIterator<Item = V>) -> Self {
        self.vertices.extend(vertices);
        self
    }

    /// Appends one initial edge.
    #[must_use]
    pub fn with_edge(mut self, edge: impl Into<EdgeSpec<V, W>>) -> Self {
        self.edges.push(edge.into());
        self
    }

    /// Appends several initial edges.
    #[must_use]
    pub fn with_edges<E>(mut self, edges: impl IntoIterator<Item = E>) -> Self
    where
        E: Into<EdgeSpec<V, W>>,
    {
        self.edges.extend(edges.into_iter().map(Into::into));
        self
    }

    /// Replaces all options at once.
    #[must_use]
    pub fn with_options(mut self, options: GraphOptions) -> Self {
        self.options = options;
        self
    }

    /// Toggles [`GraphOptions::autojoin`].
    #[must_use]
    pub fn with_autojoin(mut self, autojoin: bool) -> Self {
        self.options.autojoin = autojoin;
        self
    }

    /// Toggles [`GraphOptions::union_find`].
    #[must_use]
    pub fn with_union_find(mut self, union_find: bool) -> Self {
        self.options.union_find = union_find;
        self
    }

    /// Toggles [`GraphOptions::default_active`].
    #[must_use]
    pub fn with_default_active(mut self, default_active: bool) -> Self {
        self.options.default_active = default_active;
        self
    }

    /// Toggles [`GraphOptions::directed`].
    #[must_use]
    pub fn with_directed(mut self, directed: bool) -> Self {
        self.options.directed = directed;
        self
    }

    /// Returns the options accumulated so far.
    #[must_use]
    pub fn options(&self) -> GraphOptions {
        self.options
    }

    /// Constructs the graph.
    ///
    /// # Errors
    /// Returns [`crate::GraphError::DuplicateVertex`] when a vertex repeats and
    /// [`crate::GraphError::UnknownVertex`] when an edge names a vertex that
    /// was not supplied.
    pub fn build(self) -> Result<IncrementalGraph<V, W>> {
        IncrementalGraph::new(self.vertices, self.edges, self.weight_fn, self.options)
    }
}
