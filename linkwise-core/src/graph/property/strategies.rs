//! Strategy builders and seeded generators for mutation plans.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::types::{MutationPlan, Operation};

pub(super) const MAX_INITIAL_VERTICES: usize = 12;
const MAX_WEIGHT: u64 = 50;

/// Samples a single operation, biased towards edge toggles.
pub(super) fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => (any::<usize>(), any::<usize>(), 0..=MAX_WEIGHT, any::<bool>()).prop_map(
            |(source, target, weight, active)| Operation::AddEdge {
                source,
                target,
                weight,
                active,
            }
        ),
        3 => any::<usize>().prop_map(|pick| Operation::Activate { pick }),
        3 => any::<usize>().prop_map(|pick| Operation::Deactivate { pick }),
        1 => Just(Operation::AddNode),
    ]
}

/// Samples plans of up to `max_steps` operations.
pub(super) fn mutation_plan_strategy(max_steps: usize) -> impl Strategy<Value = MutationPlan> {
    (
        1..=MAX_INITIAL_VERTICES,
        prop::collection::vec(operation_strategy(), 1..=max_steps.max(1)),
    )
        .prop_map(|(initial_vertices, operations)| MutationPlan {
            initial_vertices,
            operations,
        })
}

/// Deterministic plan for seeded regression cases.
pub(super) fn seeded_plan(seed: u64, steps: usize) -> MutationPlan {
    let mut rng = SmallRng::seed_from_u64(seed);
    let initial_vertices = rng.gen_range(1..=MAX_INITIAL_VERTICES);
    let operations = (0..steps)
        .map(|_| match rng.gen_range(0..10) {
            0..=2 => Operation::AddEdge {
                source: rng.r#gen(),
                target: rng.r#gen(),
                weight: rng.gen_range(0..=MAX_WEIGHT),
                active: rng.gen_bool(0.6),
            },
            3..=5 => Operation::Activate { pick: rng.r#gen() },
            6..=8 => Operation::Deactivate { pick: rng.r#gen() },
            _ => Operation::AddNode,
        })
        .collect();
    MutationPlan {
        initial_vertices,
        operations,
    }
}
