//! Differential property suite for component tracking.
//!
//! Random mutation plans are replayed against an [`IncrementalGraph`] and an
//! [`ActiveEdgeModel`] side by side. After every step the tracked partition
//! must equal the connectivity recomputed from scratch.
//!
//! [`IncrementalGraph`]: crate::IncrementalGraph
//! [`ActiveEdgeModel`]: crate::test_utils::ActiveEdgeModel

mod mutation_property;
mod strategies;
mod types;
