//! Replays a [`MutationPlan`] and checks the partition after every step.

use std::collections::HashSet;

use proptest::test_runner::{TestCaseError, TestCaseResult};
use tracing::debug;

use super::types::{MutationPlan, Operation};
use crate::{
    DistancePair, SortOrder, Weight,
    test_utils::{ActiveEdgeModel, TestGraph, TestVertex, sorted, tracked_builder},
};

/// Graph under test plus everything needed to check it.
pub(super) struct MutationRun {
    pub(super) graph: TestGraph,
    model: ActiveEdgeModel,
    edges: Vec<(TestVertex, TestVertex)>,
    inserted: Vec<(TestVertex, TestVertex, u64)>,
}

impl MutationRun {
    pub(super) fn new(initial_vertices: usize) -> Result<Self, TestCaseError> {
        let graph = tracked_builder(initial_vertices)
            .build()
            .map_err(|err| TestCaseError::fail(format!("build failed: {err}")))?;
        Ok(Self {
            graph,
            model: ActiveEdgeModel::default(),
            edges: Vec::new(),
            inserted: Vec::new(),
        })
    }

    /// Applies `operation`, returning `false` when it had nothing to act on.
    pub(super) fn apply(&mut self, operation: &Operation) -> Result<bool, TestCaseError> {
        let vertex_count = self.graph.vertex_count();
        let outcome = match *operation {
            Operation::AddEdge {
                source,
                target,
                weight,
                active,
            } => {
                let (source, target) = (source % vertex_count, target % vertex_count);
                let key = (source.min(target), source.max(target));
                if !self.edges.contains(&key) {
                    self.edges.push(key);
                }
                self.inserted.push((source, target, weight));
                self.model.set(source, target, active);
                self.graph
                    .add_edge(&source, &target, Some(weight), Some(active))
            }
            Operation::Activate { pick } | Operation::Deactivate { pick } => {
                if self.edges.is_empty() {
                    return Ok(false);
                }
                let (left, right) = self.edges[pick % self.edges.len()];
                let active = matches!(operation, Operation::Activate { .. });
                self.model.set(left, right, active);
                // Toggle from the higher label half the time to exercise mirrors.
                let (source, target) = if pick % 2 == 0 {
                    (left, right)
                } else {
                    (right, left)
                };
                if active {
                    self.graph.activate_edge(&source, &target)
                } else {
                    self.graph.deactivate_edge(&source, &target)
                }
            }
            Operation::AddNode => self.graph.add_node(vertex_count),
        };
        outcome
            .map(|()| true)
            .map_err(|err| TestCaseError::fail(format!("{operation:?} failed: {err}")))
    }

    /// Compares the tracked state against the model.
    pub(super) fn check(&mut self) -> TestCaseResult {
        let vertices: Vec<TestVertex> = self.graph.vertices().copied().collect();
        let expected = self.model.components(vertices.iter().copied());
        let graph_error = |err: crate::GraphError| TestCaseError::fail(format!("component query failed: {err}"));

        for vertex in &vertices {
            let actual = sorted(self.graph.component_members(vertex).map_err(graph_error)?);
            let wanted = expected.get(vertex).cloned().unwrap_or_default();
            if actual != wanted {
                return Err(TestCaseError::fail(format!(
                    "component of {vertex} is {actual:?}, expected {wanted:?}"
                )));
            }
        }

        let distinct: HashSet<&Vec<TestVertex>> = expected.values().collect();
        let count = self.graph.component_count().map_err(graph_error)?;
        if count != distinct.len() {
            return Err(TestCaseError::fail(format!(
                "{count} components tracked, {} expected",
                distinct.len()
            )));
        }
        let total: usize = self.graph.component_sizes().map_err(graph_error)?.iter().sum();
        if total != vertices.len() {
            return Err(TestCaseError::fail(format!(
                "sizes sum to {total} over {} vertices",
                vertices.len()
            )));
        }
        if self.graph.edge_count() != self.edges.len() {
            return Err(TestCaseError::fail(format!(
                "edge_count is {}, {} distinct pairs inserted",
                self.graph.edge_count(),
                self.edges.len()
            )));
        }
        self.check_mirrors()?;
        self.check_distances()
    }

    /// Undirected records must agree in both orientations and with the model.
    fn check_mirrors(&self) -> TestCaseResult {
        let graph_error = |err: crate::GraphError| TestCaseError::fail(format!("edge lookup failed: {err}"));
        for &(left, right) in &self.edges {
            let forward = (
                self.graph.edge_weight(&left, &right).map_err(graph_error)?,
                self.graph.edge_active(&left, &right).map_err(graph_error)?,
            );
            let backward = (
                self.graph.edge_weight(&right, &left).map_err(graph_error)?,
                self.graph.edge_active(&right, &left).map_err(graph_error)?,
            );
            if forward != backward {
                return Err(TestCaseError::fail(format!(
                    "edge {left}-{right} is {forward:?} but its mirror is {backward:?}"
                )));
            }
            if forward.1 != self.model.is_active(left, right) {
                return Err(TestCaseError::fail(format!(
                    "edge {left}-{right} active flag {} disagrees with the model",
                    forward.1
                )));
            }
        }
        Ok(())
    }

    /// Both orderings must equal a stable sort of every insertion.
    fn check_distances(&mut self) -> TestCaseResult {
        let mut expected_ascending = self.inserted.clone();
        expected_ascending.sort_by(|left, right| left.2.compare(&right.2));
        let mut expected_descending = self.inserted.clone();
        expected_descending.sort_by(|left, right| right.2.compare(&left.2));

        for (order, expected) in [
            (SortOrder::Ascending, expected_ascending),
            (SortOrder::Descending, expected_descending),
        ] {
            let actual: Vec<(TestVertex, TestVertex, u64)> = self
                .graph
                .distance_pairs(order)
                .into_iter()
                .map(DistancePair::into_parts)
                .collect();
            if actual != expected {
                return Err(TestCaseError::fail(format!(
                    "{order:?} pairs are {actual:?}, expected {expected:?}"
                )));
            }
        }
        if self.graph.distances_pending_sort() {
            return Err(TestCaseError::fail("cache still dirty after a read"));
        }
        Ok(())
    }
}

pub(super) fn run_mutation_property(plan: &MutationPlan) -> TestCaseResult {
    let mut run = MutationRun::new(plan.initial_vertices)?;
    run.check()?;
    for (step, operation) in plan.operations.iter().enumerate() {
        let applied = run.apply(operation)?;
        run.check().map_err(|err| {
            debug!(step, ?operation, "partition diverged from model");
            TestCaseError::fail(format!("step {step} ({operation:?}): {err}"))
        })?;
        debug!(step, applied, "mutation step verified");
    }
    Ok(())
}
