//! Greedy linkage over the distance cache.
//!
//! Both procedures walk [`IncrementalGraph::distance_pairs`] lightest first
//! and activate edges. [`link_cheapest`] stops after a fixed number of edges
//! and reports the resulting component sizes; [`link_until_connected`] stops
//! at the merge that leaves a single component. Both need component tracking.

use std::{fmt, fmt::Debug, hash::Hash};

use thiserror::Error;
use tracing::{Span, debug, field, info, instrument};

use crate::{
    IncrementalGraph, Weight,
    distance::{DistancePair, SortOrder},
    error::{GraphError, define_error_codes},
};

/// Errors raised by the linkage procedures.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LinkageError {
    /// The graph has no vertices to link.
    #[error("cannot link an empty graph")]
    EmptyGraph,
    /// Every recorded edge was activated and components still remain.
    #[error("edges exhausted with {components} components remaining")]
    Exhausted {
        /// Components left once no edges remained.
        components: usize,
    },
    /// A graph operation failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`LinkageError`] variants.
    enum LinkageErrorCode for LinkageError {
        /// The graph has no vertices to link.
        EmptyGraph => EmptyGraph => "LINKWISE_LINKAGE_EMPTY_GRAPH",
        /// Every recorded edge was activated and components still remain.
        Exhausted => Exhausted { .. } => "LINKWISE_LINKAGE_EXHAUSTED",
        /// A graph operation failed.
        GraphFailure => Graph { .. } => "LINKWISE_LINKAGE_GRAPH_FAILURE",
    }
}

impl LinkageError {
    /// The inner [`crate::GraphErrorCode`] when the failure came from the graph.
    #[must_use]
    pub const fn graph_code(&self) -> Option<crate::GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Outcome of [`link_cheapest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheapestLinks {
    activated: usize,
    sizes: Vec<usize>,
}

impl CheapestLinks {
    /// Number of edges activated, including edges inside one component.
    #[must_use]
    #[rustfmt::skip]
    pub fn activated(&self) -> usize { self.activated }

    /// Number of components afterwards.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.sizes.len()
    }

    /// Component sizes, largest first.
    #[must_use]
    #[rustfmt::skip]
    pub fn sizes(&self) -> &[usize] { &self.sizes }

    /// The `count` largest sizes; fewer when there are fewer components.
    #[must_use]
    pub fn largest(&self, count: usize) -> &[usize] {
        self.sizes.get(..count).unwrap_or(&self.sizes)
    }

    /// Product of the `count` largest sizes, saturating at `u64::MAX`.
    #[must_use]
    pub fn product_of_largest(&self, count: usize) -> u64 {
        self.largest(count).iter().fold(1u64, |product, size| {
            product.saturating_mul(u64::try_from(*size).unwrap_or(u64::MAX))
        })
    }
}

/// The merge that left a single component, as reported by
/// [`link_until_connected`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalLink<V, W> {
    edge: DistancePair<V, W>,
    activated: usize,
}

impl<V, W: Copy> FinalLink<V, W> {
    /// The edge whose activation connected the graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge(&self) -> &DistancePair<V, W> { &self.edge }

    /// Edges activated up to and including the final one. Edges whose
    /// endpoints were already connected are skipped and not counted.
    #[must_use]
    #[rustfmt::skip]
    pub fn activated(&self) -> usize { self.activated }
}

/// Activates the `limit` lightest recorded edges and reports the components.
///
/// Edges whose endpoints are already connected still count towards `limit`.
///
/// # Errors
/// Returns [`LinkageError::EmptyGraph`] for a graph without vertices and
/// [`LinkageError::Graph`] when the graph does not track components.
///
/// # Examples
/// ```
/// use linkwise_core::{GraphBuilder, link_cheapest};
///
/// fn gap(a: &i32, b: &i32) -> i32 {
///     (a - b).abs()
/// }
///
/// let mut graph = GraphBuilder::new(gap as fn(&i32, &i32) -> i32)
///     .with_vertices([0, 1, 2, 10, 11, 30])
///     .with_autojoin(true)
///     .with_union_find(true)
///     .build()?;
/// let links = link_cheapest(&mut graph, 4)?;
/// assert_eq!(links.sizes(), &[3, 2, 1]);
/// assert_eq!(links.product_of_largest(2), 6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "linkage.cheapest",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), activated = field::Empty, components = field::Empty),
)]
pub fn link_cheapest<V, W>(
    graph: &mut IncrementalGraph<V, W>,
    limit: usize,
) -> Result<CheapestLinks, LinkageError>
where
    V: Clone + Eq + Hash + Debug,
    W: Weight,
{
    if graph.vertex_count() == 0 {
        return Err(LinkageError::EmptyGraph);
    }
    // Fails early when the graph does not track components.
    graph.component_count()?;

    let mut activated = 0;
    for pair in graph.distance_pairs(SortOrder::Ascending).iter().take(limit) {
        graph.activate_edge(pair.source(), pair.target())?;
        activated += 1;
    }

    let mut sizes = graph.component_sizes()?;
    sizes.sort_unstable_by(|left, right| right.cmp(left));

    let span = Span::current();
    span.record("activated", activated);
    span.record("components", sizes.len());
    info!(
        activated,
        components = sizes.len(),
        largest = sizes.first().copied().unwrap_or(0),
        "cheapest linkage completed"
    );
    Ok(CheapestLinks { activated, sizes })
}

/// Activates the lightest edges until one component remains and returns the
/// edge that completed the merge.
///
/// Returns `Ok(None)` when the graph was already connected. Edges inside an
/// existing component are skipped.
///
/// # Errors
/// Returns [`LinkageError::EmptyGraph`] for a graph without vertices,
/// [`LinkageError::Exhausted`] when the recorded edges cannot connect the
/// graph, and [`LinkageError::Graph`] when the graph does not track
/// components.
///
/// # Examples
/// ```
/// use linkwise_core::{GraphBuilder, link_until_connected};
///
/// fn gap(a: &i32, b: &i32) -> i32 {
///     (a - b).abs()
/// }
///
/// let mut graph = GraphBuilder::new(gap as fn(&i32, &i32) -> i32)
///     .with_vertices([0, 1, 2, 10, 11, 30])
///     .with_autojoin(true)
///     .with_union_find(true)
///     .build()?;
/// let link = link_until_connected(&mut graph)?.expect("graph starts split");
/// assert_eq!(link.edge().weight(), 19);
/// assert_eq!(link.activated(), 5);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "linkage.until_connected",
    err,
    skip(graph),
    fields(vertices = graph.vertex_count(), activated = field::Empty),
)]
pub fn link_until_connected<V, W>(
    graph: &mut IncrementalGraph<V, W>,
) -> Result<Option<FinalLink<V, W>>, LinkageError>
where
    V: Clone + Eq + Hash + Debug,
    W: Weight,
{
    if graph.vertex_count() == 0 {
        return Err(LinkageError::EmptyGraph);
    }
    let mut remaining = graph.component_count()?;
    if remaining <= 1 {
        return Ok(None);
    }

    let mut activated = 0;
    for pair in graph.distance_pairs(SortOrder::Ascending) {
        if graph.same_component(pair.source(), pair.target())? {
            continue;
        }
        graph.activate_edge(pair.source(), pair.target())?;
        activated += 1;
        remaining -= 1;
        debug!(
            source = ?pair.source(),
            target = ?pair.target(),
            remaining,
            "components merged"
        );
        if remaining == 1 {
            Span::current().record("activated", activated);
            info!(activated, "graph connected");
            return Ok(Some(FinalLink {
                edge: pair,
                activated,
            }));
        }
    }
    Err(LinkageError::Exhausted {
        components: remaining,
    })
}

impl<V: fmt::Display, W: fmt::Display + Copy> fmt::Display for FinalLink<V, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -- {} ({})",
            self.edge.source(),
            self.edge.target(),
            self.edge.weight()
        )
    }
}
