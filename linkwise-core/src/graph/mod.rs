//! The incrementally partitioned graph.
//!
//! [`IncrementalGraph`] stores vertices in insertion order, keeps one
//! adjacency record per directed edge (two mirrored records per undirected
//! edge), feeds every insertion into the lazily sorted distance cache and, when
//! component tracking is on, keeps the component partition exact after every
//! mutation.

mod components;
mod connectivity;

#[cfg(test)]
mod property;

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use indexmap::{IndexMap, IndexSet};

use crate::{
    EdgeSpec, GraphOptions, Result, Weight, WeightFn,
    distance::{DistanceIndex, DistancePair, SortOrder},
    edge::EdgeState,
    error::GraphError,
    partition::ComponentPartition,
};

type Adjacency<V, W> = HashMap<V, IndexMap<V, EdgeState<W>>>;

/// A weighted graph that tracks connected components as edges are activated
/// and deactivated.
///
/// Only *active* edges connect vertices. Activation merges components with a
/// direct-mapped union-find; deactivation re-checks reachability by
/// breadth-first search and splits the component when the cut disconnects it.
///
/// Cloning produces a fully independent graph, so two mutation sequences can
/// be explored from one starting point.
///
/// # Examples
/// ```
/// use linkwise_core::{GraphOptions, IncrementalGraph};
///
/// fn unit(_: &char, _: &char) -> u32 {
///     1
/// }
///
/// let options = GraphOptions { union_find: true, ..GraphOptions::default() };
/// let mut graph = IncrementalGraph::new(
///     ['a', 'b', 'c'],
///     [('a', 'b', 1), ('b', 'c', 2), ('a', 'c', 3)],
///     unit as fn(&char, &char) -> u32,
///     options,
/// )?;
/// assert_eq!(graph.component_count()?, 3);
///
/// graph.activate_edge(&'a', &'b')?;
/// graph.activate_edge(&'b', &'c')?;
/// assert_eq!(graph.component_count()?, 1);
///
/// graph.deactivate_edge(&'a', &'b')?;
/// assert_eq!(graph.component_count()?, 2);
/// assert_eq!(graph.component_size_of(&'b')?, 2);
/// # Ok::<(), linkwise_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct IncrementalGraph<V, W> {
    options: GraphOptions,
    weight_fn: WeightFn<V, W>,
    vertices: IndexSet<V>,
    adjacency: Adjacency<V, W>,
    edge_count: usize,
    distances: DistanceIndex<V, W>,
    partition: Option<ComponentPartition<V>>,
}

impl<V, W> IncrementalGraph<V, W>
where
    V: Clone + Eq + Hash + Debug,
    W: Weight,
{
    /// Builds a graph from initial vertices and edges.
    ///
    /// Vertices are registered first, each in its own component. With
    /// `autojoin` every unordered pair is then joined (both orientations when
    /// directed). The explicit `edges` are inserted last, so they override
    /// autojoined records for the same pair.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateVertex`] when `vertices` repeats a value
    /// and [`GraphError::UnknownVertex`] when an edge names a vertex missing
    /// from `vertices`.
    pub fn new<E>(
        vertices: impl IntoIterator<Item = V>,
        edges: impl IntoIterator<Item = E>,
        weight_fn: WeightFn<V, W>,
        options: GraphOptions,
    ) -> Result<Self>
    where
        E: Into<EdgeSpec<V, W>>,
    {
        let mut graph = Self {
            options,
            weight_fn,
            vertices: IndexSet::new(),
            adjacency: HashMap::new(),
            edge_count: 0,
            distances: DistanceIndex::default(),
            partition: options
                .tracks_components()
                .then(ComponentPartition::default),
        };

        for vertex in vertices {
            graph.register(vertex)?;
        }
        if options.autojoin {
            graph.join_all_pairs()?;
        }
        for edge in edges {
            let EdgeSpec {
                source,
                target,
                weight,
                active,
            } = edge.into();
            graph.add_edge(&source, &target, weight, active)?;
        }
        Ok(graph)
    }

    /// Options the graph was built with.
    #[must_use]
    pub const fn options(&self) -> GraphOptions {
        self.options
    }

    /// Number of registered vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &V> {
        self.vertices.iter()
    }

    /// Whether `vertex` is registered.
    #[must_use]
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    /// Number of logical edges; a mirrored undirected pair counts once.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Adds a vertex in its own singleton component.
    ///
    /// With `autojoin` the new vertex is joined to every existing vertex, each
    /// join going through [`Self::add_edge`].
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateVertex`] if `vertex` is already present;
    /// the graph is left unchanged.
    pub fn add_node(&mut self, vertex: V) -> Result<()> {
        self.register(vertex.clone())?;
        if self.options.autojoin {
            let existing: Vec<V> = self
                .vertices
                .iter()
                .filter(|other| **other != vertex)
                .cloned()
                .collect();
            for other in &existing {
                self.add_edge(other, &vertex, None, None)?;
                if self.options.directed {
                    self.add_edge(&vertex, other, None, None)?;
                }
            }
        }
        Ok(())
    }

    /// Inserts or overwrites the edge `source -> target` (and its mirror when
    /// undirected).
    ///
    /// `weight` defaults to the weight function and `active` to
    /// [`GraphOptions::default_active`]. An active result merges components;
    /// overwriting an active edge with an inactive one re-checks connectivity
    /// as [`Self::deactivate_edge`] would. The pair is always appended to the
    /// distance cache, so overwriting with a new weight leaves the superseded
    /// triple in place.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] if either endpoint is not
    /// registered; the graph is left unchanged.
    pub fn add_edge(
        &mut self,
        source: &V,
        target: &V,
        weight: Option<W>,
        active: Option<bool>,
    ) -> Result<()> {
        self.require_vertex(source)?;
        self.require_vertex(target)?;

        let weight = weight.unwrap_or_else(|| (self.weight_fn)(source, target));
        let active = active.unwrap_or(self.options.default_active);
        let state = EdgeState { weight, active };

        let previous = self.write_record(source, target, state);
        if !self.options.directed {
            self.write_record(target, source, state);
        }
        if previous.is_none() {
            self.edge_count += 1;
        }

        let was_active = previous.is_some_and(|old| old.active);
        if active {
            self.link(source, target);
        } else if was_active {
            self.cut(source, target);
        }

        self.distances
            .record(DistancePair::new(source.clone(), target.clone(), weight));
        Ok(())
    }

    /// Whether a record exists for `source -> target`.
    #[must_use]
    pub fn has_edge(&self, source: &V, target: &V) -> bool {
        self.record(source, target).is_some()
    }

    /// Weight of the edge `source -> target`.
    ///
    /// # Errors
    /// Returns [`GraphError::NoSuchEdge`] if the record does not exist.
    pub fn edge_weight(&self, source: &V, target: &V) -> Result<W> {
        self.require_record(source, target).map(|state| state.weight)
    }

    /// Whether the edge `source -> target` is active.
    ///
    /// # Errors
    /// Returns [`GraphError::NoSuchEdge`] if the record does not exist.
    pub fn edge_active(&self, source: &V, target: &V) -> Result<bool> {
        self.require_record(source, target).map(|state| state.active)
    }

    /// Vertices reachable from `vertex` over one active edge, in insertion
    /// order of the edges.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownVertex`] if `vertex` is not registered.
    pub fn active_neighbours(&self, vertex: &V) -> Result<Vec<V>> {
        self.require_vertex(vertex)?;
        Ok(self
            .adjacency
            .get(vertex)
            .into_iter()
            .flatten()
            .filter(|(_, state)| state.active)
            .map(|(neighbour, _)| neighbour.clone())
            .collect())
    }

    /// Every edge ever inserted, sorted by weight in `order`.
    ///
    /// One triple is recorded per [`Self::add_edge`] call. Equal weights keep
    /// insertion order. The cache is only re-sorted when an insertion happened
    /// since the previous call, and the result is a detached copy.
    pub fn distance_pairs(&mut self, order: SortOrder) -> Vec<DistancePair<V, W>> {
        self.distances.pairs(order)
    }

    /// Whether the distance cache will re-sort on the next read.
    #[must_use]
    pub const fn distances_pending_sort(&self) -> bool {
        self.distances.is_dirty()
    }

    fn register(&mut self, vertex: V) -> Result<()> {
        if self.vertices.contains(&vertex) {
            return Err(GraphError::duplicate_vertex(&vertex));
        }
        if let Some(partition) = self.partition.as_mut() {
            partition.insert_singleton(vertex.clone());
        }
        self.vertices.insert(vertex);
        Ok(())
    }

    fn join_all_pairs(&mut self) -> Result<()> {
        let vertices: Vec<V> = self.vertices.iter().cloned().collect();
        for (position, left) in vertices.iter().enumerate() {
            for right in vertices.iter().skip(position + 1) {
                self.add_edge(left, right, None, None)?;
                if self.options.directed {
                    self.add_edge(right, left, None, None)?;
                }
            }
        }
        Ok(())
    }

    fn write_record(&mut self, source: &V, target: &V, state: EdgeState<W>) -> Option<EdgeState<W>> {
        self.adjacency
            .entry(source.clone())
            .or_default()
            .insert(target.clone(), state)
    }

    fn record(&self, source: &V, target: &V) -> Option<&EdgeState<W>> {
        self.adjacency.get(source)?.get(target)
    }

    fn record_mut(&mut self, source: &V, target: &V) -> Option<&mut EdgeState<W>> {
        self.adjacency.get_mut(source)?.get_mut(target)
    }

    fn require_record(&self, source: &V, target: &V) -> Result<&EdgeState<W>> {
        self.record(source, target)
            .ok_or_else(|| GraphError::no_such_edge(source, target))
    }

    fn require_vertex(&self, vertex: &V) -> Result<()> {
        if self.vertices.contains(vertex) {
            Ok(())
        } else {
            Err(GraphError::unknown_vertex(vertex))
        }
    }
}
