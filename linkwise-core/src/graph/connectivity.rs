//! Edge activation and deactivation.
//!
//! Activation is cheap: the partition relabels the smaller component. A cut
//! cannot be undone by union-find, so deactivation searches the remaining
//! active edges and splits the component only when the cut disconnected it.

use std::{
    collections::{HashSet, VecDeque},
    fmt::Debug,
    hash::Hash,
};

use super::{Adjacency, IncrementalGraph};
use crate::{Result, Weight, error::GraphError};

impl<V, W> IncrementalGraph<V, W>
where
    V: Clone + Eq + Hash + Debug,
    W: Weight,
{
    /// Marks `source -> target` (and its mirror when undirected) active and
    /// merges the endpoints' components.
    ///
    /// Activating an edge that is already active, or one whose endpoints
    /// already share a component, leaves the partition untouched.
    ///
    /// # Errors
    /// Returns [`GraphError::NoSuchEdge`] if the edge was never added.
    pub fn activate_edge(&mut self, source: &V, target: &V) -> Result<()> {
        self.set_active(source, target, true)?;
        self.link(source, target);
        Ok(())
    }

    /// Marks `source -> target` (and its mirror when undirected) inactive and
    /// splits the component if the endpoints are no longer connected.
    ///
    /// Costs a breadth-first search over the component whenever the endpoints
    /// shared one.
    ///
    /// # Errors
    /// Returns [`GraphError::NoSuchEdge`] if the edge was never added.
    pub fn deactivate_edge(&mut self, source: &V, target: &V) -> Result<()> {
        self.set_active(source, target, false)?;
        self.cut(source, target);
        Ok(())
    }

    fn set_active(&mut self, source: &V, target: &V, active: bool) -> Result<()> {
        let record = self
            .record_mut(source, target)
            .ok_or_else(|| GraphError::no_such_edge(source, target))?;
        record.active = active;
        if !self.options.directed {
            if let Some(mirror) = self.record_mut(target, source) {
                mirror.active = active;
            }
        }
        Ok(())
    }

    pub(super) fn link(&mut self, source: &V, target: &V) {
        if let Some(partition) = self.partition.as_mut() {
            partition.link(source, target);
        }
    }

    pub(super) fn cut(&mut self, source: &V, target: &V) {
        let Some(partition) = self.partition.as_mut() else {
            return;
        };
        let (Some(left), Some(right)) = (
            partition.component_of(source),
            partition.component_of(target),
        ) else {
            return;
        };
        if left != right {
            return;
        }
        let reachable = active_reachable(&self.adjacency, source);
        if reachable.contains(target) {
            return;
        }
        partition.split(left, reachable);
    }
}

/// Vertices reachable from `start` over active edges, `start` included.
fn active_reachable<V, W>(adjacency: &Adjacency<V, W>, start: &V) -> HashSet<V>
where
    V: Clone + Eq + Hash,
{
    let mut seen = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([start.clone()]);
    while let Some(current) = queue.pop_front() {
        let Some(edges) = adjacency.get(&current) else {
            continue;
        };
        for (neighbour, state) in edges {
            if state.active && seen.insert(neighbour.clone()) {
                queue.push_back(neighbour.clone());
            }
        }
    }
    seen
}
