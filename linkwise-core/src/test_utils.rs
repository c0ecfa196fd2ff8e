//! Shared test utilities for `linkwise-core`.

use std::collections::{HashMap, HashSet, VecDeque};

use linkwise_test_support::profile::PropertyProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{GraphBuilder, IncrementalGraph};

/// Vertex type used throughout the unit and property suites.
pub(crate) type TestVertex = usize;

/// Graph shape used throughout the unit and property suites.
pub(crate) type TestGraph = IncrementalGraph<TestVertex, u64>;

/// Weight function for [`TestVertex`] graphs: the gap between the labels.
pub(crate) fn label_gap(left: &TestVertex, right: &TestVertex) -> u64 {
    left.abs_diff(*right) as u64
}

/// Builder over `0..vertex_count` with union-find tracking enabled.
pub(crate) fn tracked_builder(vertex_count: usize) -> GraphBuilder<TestVertex, u64> {
    GraphBuilder::new(label_gap as fn(&TestVertex, &TestVertex) -> u64)
        .with_vertices(0..vertex_count)
        .with_union_find(true)
}

/// Resolves the proptest configuration from the shared profile.
pub(crate) fn suite_proptest_config(default_cases: u32, default_max_steps: usize) -> (ProptestConfig, usize) {
    let profile = PropertyProfile::load(PropertyProfile::new(default_cases, false, default_max_steps));
    let config = ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    };
    (config, profile.max_steps())
}

/// Independent model of which undirected edges are active, used as the
/// brute-force oracle for connectivity.
#[derive(Clone, Debug, Default)]
pub(crate) struct ActiveEdgeModel {
    active: HashSet<(TestVertex, TestVertex)>,
}

impl ActiveEdgeModel {
    pub(crate) fn set(&mut self, left: TestVertex, right: TestVertex, active: bool) {
        let key = (left.min(right), left.max(right));
        if active {
            self.active.insert(key);
        } else {
            self.active.remove(&key);
        }
    }

    pub(crate) fn is_active(&self, left: TestVertex, right: TestVertex) -> bool {
        self.active.contains(&(left.min(right), left.max(right)))
    }

    /// Components of `vertices` under the active edges, each as a sorted list,
    /// keyed by vertex.
    pub(crate) fn components(
        &self,
        vertices: impl IntoIterator<Item = TestVertex>,
    ) -> HashMap<TestVertex, Vec<TestVertex>> {
        let mut neighbours: HashMap<TestVertex, Vec<TestVertex>> = HashMap::new();
        for &(left, right) in &self.active {
            neighbours.entry(left).or_default().push(right);
            neighbours.entry(right).or_default().push(left);
        }

        let mut result = HashMap::new();
        for start in vertices {
            if result.contains_key(&start) {
                continue;
            }
            let mut seen = HashSet::from([start]);
            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                for &next in neighbours.get(&current).into_iter().flatten() {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
            let mut members: Vec<TestVertex> = seen.into_iter().collect();
            members.sort_unstable();
            for member in &members {
                result.insert(*member, members.clone());
            }
        }
        result
    }
}

/// Sorted copy of a member set, for order-insensitive comparisons.
pub(crate) fn sorted(members: impl IntoIterator<Item = TestVertex>) -> Vec<TestVertex> {
    let mut members: Vec<TestVertex> = members.into_iter().collect();
    members.sort_unstable();
    members
}
