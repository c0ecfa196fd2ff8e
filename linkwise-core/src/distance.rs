//! Lazily sorted distance cache.
//!
//! Every inserted edge appends one [`DistancePair`] to both orderings and marks
//! the cache dirty. Reads re-sort only when dirty. Sorting is stable, so pairs
//! with equal weight stay in insertion order in both directions.

use crate::Weight;

/// Direction in which [`crate::IncrementalGraph::distance_pairs`] enumerates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Lightest edge first.
    #[default]
    Ascending,
    /// Heaviest edge first.
    Descending,
}

/// One recorded `(source, target, weight)` triple.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DistancePair<V, W> {
    source: V,
    target: V,
    weight: W,
}

impl<V, W: Copy> DistancePair<V, W> {
    pub(crate) const fn new(source: V, target: V, weight: W) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Endpoint the edge was inserted from.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> &V { &self.source }

    /// Endpoint the edge was inserted to.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> &V { &self.target }

    /// Weight recorded when the edge was inserted.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> W { self.weight }

    /// Splits the pair into its parts.
    #[must_use]
    pub fn into_parts(self) -> (V, V, W) {
        (self.source, self.target, self.weight)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct DistanceIndex<V, W> {
    ascending: Vec<DistancePair<V, W>>,
    descending: Vec<DistancePair<V, W>>,
    dirty: bool,
}

impl<V, W> Default for DistanceIndex<V, W> {
    fn default() -> Self {
        Self {
            ascending: Vec::new(),
            descending: Vec::new(),
            dirty: false,
        }
    }
}

impl<V: Clone, W: Weight> DistanceIndex<V, W> {
    pub(crate) fn record(&mut self, pair: DistancePair<V, W>) {
        self.descending.push(pair.clone());
        self.ascending.push(pair);
        self.dirty = true;
    }

    pub(crate) fn pairs(&mut self, order: SortOrder) -> Vec<DistancePair<V, W>> {
        if self.dirty {
            self.ascending
                .sort_by(|left, right| left.weight.compare(&right.weight));
            self.descending
                .sort_by(|left, right| right.weight.compare(&left.weight));
            self.dirty = false;
        }
        match order {
            SortOrder::Ascending => self.ascending.clone(),
            SortOrder::Descending => self.descending.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.ascending.len()
    }

    pub(crate) const fn is_dirty(&self) -> bool {
        self.dirty
    }
}
