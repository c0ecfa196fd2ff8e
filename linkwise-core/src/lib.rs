//! Incremental connectivity tracking over weighted graphs.
//!
//! [`IncrementalGraph`] keeps the connected components of its *active* edges
//! exact while edges are switched on and off, and exposes every inserted edge
//! sorted by weight through a lazily re-sorted cache. The [`link_cheapest`]
//! and [`link_until_connected`] procedures drive it greedily, lightest edge
//! first, to answer clustering questions over point sets such as [`Point3`].
//!
//! The graph itself performs no logging; the linkage procedures emit
//! `tracing` spans named `linkage.*`.

mod builder;
mod distance;
mod edge;
mod error;
mod graph;
mod linkage;
mod partition;
mod point;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    builder::{GraphBuilder, GraphOptions},
    distance::{DistancePair, SortOrder},
    edge::{EdgeSpec, Weight, WeightFn},
    error::{GraphError, GraphErrorCode, Result, UnsupportedReason},
    graph::IncrementalGraph,
    linkage::{
        CheapestLinks, FinalLink, LinkageError, LinkageErrorCode, link_cheapest,
        link_until_connected,
    },
    point::{ParsePointError, Point3, squared_distance},
};
