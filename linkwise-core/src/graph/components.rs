//! Component queries.
//!
//! Every query returns owned snapshots and skips retired component slots.

use std::{collections::HashSet, fmt::Debug, hash::Hash};

use super::IncrementalGraph;
use crate::{
    Result, Weight,
    error::{GraphError, UnsupportedReason},
    partition::{ComponentId, ComponentPartition},
};

impl<V, W> IncrementalGraph<V, W>
where
    V: Clone + Eq + Hash + Debug,
    W: Weight,
{
    /// Whether component queries are answerable on this graph.
    #[must_use]
    pub const fn is_tracking_components(&self) -> bool {
        self.partition.is_some()
    }

    /// Members of the component containing `vertex`, `vertex` included.
    ///
    /// # Errors
    /// Returns [`GraphError::Unsupported`] if components are not tracked and
    /// [`GraphError::UnknownVertex`] if `vertex` is not registered.
    pub fn component_members(&self, vertex: &V) -> Result<HashSet<V>> {
        let (partition, id) = self.locate("component_members", vertex)?;
        Ok(partition.members(id).cloned().unwrap_or_default())
    }

    /// Size of the component containing `vertex`.
    ///
    /// # Errors
    /// Returns [`GraphError::Unsupported`] if components are not tracked and
    /// [`GraphError::UnknownVertex`] if `vertex` is not registered.
    pub fn component_size_of(&self, vertex: &V) -> Result<usize> {
        let (partition, id) = self.locate("component_size_of", vertex)?;
        Ok(partition.members(id).map_or(0, HashSet::len))
    }

    /// Whether `left` and `right` are connected by active edges.
    ///
    /// # Errors
    /// Returns [`GraphError::Unsupported`] if components are not tracked and
    /// [`GraphError::UnknownVertex`] if either vertex is not registered.
    pub fn same_component(&self, left: &V, right: &V) -> Result<bool> {
        let (_, left_id) = self.locate("same_component", left)?;
        let (_, right_id) = self.locate("same_component", right)?;
        Ok(left_id == right_id)
    }

    /// Number of live components.
    ///
    /// # Errors
    /// Returns [`GraphError::Unsupported`] if components are not tracked.
    pub fn component_count(&self) -> Result<usize> {
        Ok(self.tracked("component_count")?.live_count())
    }

    /// Sizes of all live components, in component creation order.
    ///
    /// # Errors
    /// Returns [`GraphError::Unsupported`] if components are not tracked.
    pub fn component_sizes(&self) -> Result<Vec<usize>> {
        Ok(self
            .tracked("component_sizes")?
            .live()
            .map(HashSet::len)
            .collect())
    }

    /// Member sets of all live components, in component creation order.
    ///
    /// # Errors
    /// Returns [`GraphError::Unsupported`] if components are not tracked.
    pub fn components(&self) -> Result<Vec<HashSet<V>>> {
        Ok(self.tracked("components")?.live().cloned().collect())
    }

    fn tracked(&self, operation: &'static str) -> Result<&ComponentPartition<V>> {
        self.partition.as_ref().ok_or(GraphError::Unsupported {
            operation,
            reason: if self.options.directed {
                UnsupportedReason::Directed
            } else {
                UnsupportedReason::UnionFindDisabled
            },
        })
    }

    fn locate(
        &self,
        operation: &'static str,
        vertex: &V,
    ) -> Result<(&ComponentPartition<V>, ComponentId)> {
        let partition = self.tracked(operation)?;
        let id = partition
            .component_of(vertex)
            .ok_or_else(|| GraphError::unknown_vertex(vertex))?;
        Ok((partition, id))
    }
}
