//! Component partition backing the graph's connectivity queries.
//!
//! Components live in an append-only arena indexed by [`ComponentId`]. Each
//! vertex maps directly to its id, so membership is a single lookup with no
//! parent chasing. Merging folds the smaller member set into the larger and
//! tombstones the retired slot; splitting moves the unreachable remainder into
//! a freshly appended slot. Ids are never reused and tombstones are never
//! compacted, so every enumeration must skip empty slots.

use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

/// Index of a component slot in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ComponentId(usize);

/// What [`ComponentPartition::link`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LinkOutcome {
    /// Both vertices already shared a component.
    AlreadyJoined,
    /// Two components were merged; `retired` is now a tombstone.
    Merged {
        kept: ComponentId,
        retired: ComponentId,
    },
    /// An unassigned vertex joined an existing component.
    Adopted(ComponentId),
    /// Neither vertex was assigned; a new component holds both.
    Opened(ComponentId),
}

#[derive(Clone, Debug)]
pub(crate) struct ComponentPartition<V> {
    assignments: HashMap<V, ComponentId>,
    slots: Vec<Option<HashSet<V>>>,
}

impl<V> Default for ComponentPartition<V> {
    fn default() -> Self {
        Self {
            assignments: HashMap::new(),
            slots: Vec::new(),
        }
    }
}

impl<V: Clone + Eq + Hash> ComponentPartition<V> {
    pub(crate) fn component_of(&self, vertex: &V) -> Option<ComponentId> {
        self.assignments.get(vertex).copied()
    }

    pub(crate) fn members(&self, id: ComponentId) -> Option<&HashSet<V>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Live member sets in id order.
    pub(crate) fn live(&self) -> impl Iterator<Item = &HashSet<V>> {
        self.slots.iter().flatten()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Total slots ever allocated, tombstones included.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Places `vertex` alone in a new component.
    ///
    /// A vertex that already had a component keeps stale membership in its old
    /// slot, so callers must reject duplicates first.
    pub(crate) fn insert_singleton(&mut self, vertex: V) -> ComponentId {
        let id = self.allocate(HashSet::from([vertex.clone()]));
        self.assignments.insert(vertex, id);
        id
    }

    pub(crate) fn link(&mut self, left: &V, right: &V) -> LinkOutcome {
        match (self.component_of(left), self.component_of(right)) {
            (Some(a), Some(b)) if a == b => LinkOutcome::AlreadyJoined,
            (Some(a), Some(b)) => self.merge(a, b),
            (Some(id), None) => self.adopt(id, right.clone()),
            (None, Some(id)) => self.adopt(id, left.clone()),
            (None, None) => {
                let id = self.allocate(HashSet::from([left.clone(), right.clone()]));
                self.assignments.insert(left.clone(), id);
                self.assignments.insert(right.clone(), id);
                LinkOutcome::Opened(id)
            }
        }
    }

    /// Shrinks `id` to `keep` and moves the rest of its members to a new
    /// component. Returns the new id, or `None` when nothing was left over.
    pub(crate) fn split(&mut self, id: ComponentId, keep: HashSet<V>) -> Option<ComponentId> {
        let members = self.slots.get_mut(id.0)?.as_mut()?;
        let remainder: HashSet<V> = members
            .drain()
            .filter(|vertex| !keep.contains(vertex))
            .collect();
        *members = keep;
        if remainder.is_empty() {
            return None;
        }
        let fresh = self.allocate(remainder);
        self.relabel(fresh);
        Some(fresh)
    }

    fn merge(&mut self, a: ComponentId, b: ComponentId) -> LinkOutcome {
        let size = |id: ComponentId| self.members(id).map_or(0, HashSet::len);
        let (kept, retired) = if size(a) >= size(b) { (a, b) } else { (b, a) };

        let folded = self
            .slots
            .get_mut(retired.0)
            .and_then(Option::take)
            .unwrap_or_default();
        for vertex in &folded {
            self.assignments.insert(vertex.clone(), kept);
        }
        if let Some(Some(target)) = self.slots.get_mut(kept.0) {
            target.extend(folded);
        }
        LinkOutcome::Merged { kept, retired }
    }

    fn adopt(&mut self, id: ComponentId, vertex: V) -> LinkOutcome {
        if let Some(Some(members)) = self.slots.get_mut(id.0) {
            members.insert(vertex.clone());
        }
        self.assignments.insert(vertex, id);
        LinkOutcome::Adopted(id)
    }

    fn allocate(&mut self, members: HashSet<V>) -> ComponentId {
        let id = ComponentId(self.slots.len());
        self.slots.push(Some(members));
        id
    }

    fn relabel(&mut self, id: ComponentId) {
        let Some(Some(members)) = self.slots.get(id.0) else {
            return;
        };
        for vertex in members {
            self.assignments.insert(vertex.clone(), id);
        }
    }
}
