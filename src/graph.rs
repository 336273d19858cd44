use std::collections::VecDeque;

use tracing::debug;

use crate::common::{validate, RatioConstraint};
use crate::error::InputError;
use crate::solution::{Proportions, Resolution};

/// Adjacency view of the constraint graph: ingredient index to the positions
/// of its incident constraints, in input order. Built once, read-only during
/// resolution.
#[derive(Debug)]
pub struct ConstraintGraph<'a> {
    ingredient_count: usize,
    constraints: &'a [RatioConstraint],
    incidence: Vec<Vec<usize>>,
}

impl<'a> ConstraintGraph<'a> {
    pub fn build(
        ingredient_count: usize,
        constraints: &'a [RatioConstraint],
    ) -> Result<Self, InputError> {
        validate(ingredient_count, constraints)?;
        let mut incidence = vec![Vec::new(); ingredient_count];
        for (position, constraint) in constraints.iter().enumerate() {
            incidence[constraint.one.index].push(position);
            incidence[constraint.two.index].push(position);
        }
        Ok(ConstraintGraph {
            ingredient_count,
            constraints,
            incidence,
        })
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredient_count
    }

    /// Positions of the constraints touching `index`, in input order.
    pub fn incident(&self, index: usize) -> &[usize] {
        &self.incidence[index]
    }

    pub fn resolve_proportions(&self) -> Resolution {
        self.resolve_proportions_from(0)
    }

    /// Propagates relative weights outward from `anchor` and normalizes.
    ///
    /// The anchor is seeded with an arbitrary reference weight. Visiting an
    /// edge to a new ingredient rescales the whole table by the near side's
    /// amount, so every fixed ratio survives while the far side enters the
    /// common unit. The system has a unique solution exactly when the
    /// traversal reaches all ingredients; with n - 1 edges that also rules
    /// out cycles.
    pub fn resolve_proportions_from(&self, anchor: usize) -> Resolution {
        let n = self.ingredient_count;
        let mut weights = ResolvedWeights::seeded(n, anchor);
        let mut visited = vec![false; n];
        visited[anchor] = true;
        let mut queue = VecDeque::with_capacity(n);
        queue.push_back(anchor);
        let mut visit_count = 1;

        while let Some(index) = queue.pop_front() {
            for &position in self.incident(index) {
                let (current, adjacent) = self.constraints[position].oriented_from(index);
                if visited[adjacent.index] {
                    // Closes a cycle back to a resolved ingredient, or is a
                    // duplicate edge. Skipped; the wasted edge shows up as an
                    // unreached ingredient below.
                    continue;
                }
                visited[adjacent.index] = true;
                queue.push_back(adjacent.index);
                visit_count += 1;
                weights.adjoin(index, current.amount, adjacent.index, adjacent.amount);
            }
        }

        if visit_count != n {
            debug!(
                visit_count,
                ingredient_count = n,
                "constraint graph does not span all ingredients"
            );
            return Resolution::NoUniqueSolution;
        }
        match weights.normalized() {
            Some(proportions) => Resolution::Solved(proportions),
            None => Resolution::NoUniqueSolution,
        }
    }
}

/// Weight table scoped to one traversal. Assigned entries all share one unit.
struct ResolvedWeights(Vec<Option<f64>>);

impl ResolvedWeights {
    fn seeded(len: usize, anchor: usize) -> Self {
        let mut table = vec![None; len];
        // arbitrary reference weight; normalization cancels it
        table[anchor] = Some(1.0);
        ResolvedWeights(table)
    }

    /// Brings `adjacent_index` into the table's unit system. `current_index`
    /// must already be resolved; its pre-rescale weight anchors the new entry.
    fn adjoin(
        &mut self,
        current_index: usize,
        current_amount: u32,
        adjacent_index: usize,
        adjacent_amount: u32,
    ) {
        debug_assert!(self.0[current_index].is_some());
        let Some(current_weight) = self.0[current_index] else {
            return;
        };
        for slot in self.0.iter_mut() {
            if let Some(weight) = slot {
                *weight *= f64::from(current_amount);
            }
        }
        self.0[adjacent_index] = Some(f64::from(adjacent_amount) * current_weight);
    }

    /// Normalizes into proportions; `None` if any ingredient was never
    /// resolved.
    fn normalized(self) -> Option<Proportions> {
        let mut weights = Vec::with_capacity(self.0.len());
        for slot in self.0 {
            weights.push(slot?);
        }
        Some(Proportions::normalize(weights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve;
    use pathfinding::prelude::bfs_reach;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    /// Random spanning tree over `ingredient_count` nodes: each node past the
    /// first attaches to a random earlier node, sides and amounts randomized,
    /// then the constraint order is shuffled.
    fn generate_random_tree(ingredient_count: usize, seed: u64) -> Vec<RatioConstraint> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut constraints = Vec::with_capacity(ingredient_count - 1);
        for index in 1..ingredient_count {
            let parent = rng.gen_range(0..index);
            let parent_amount = rng.gen_range(1..10);
            let child_amount = rng.gen_range(1..10);
            let constraint = if rng.gen_bool(0.5) {
                RatioConstraint::new(parent, index, parent_amount, child_amount)
            } else {
                RatioConstraint::new(index, parent, child_amount, parent_amount)
            };
            constraints.push(constraint);
        }
        constraints.shuffle(&mut rng);
        constraints
    }

    fn resolved(ingredient_count: usize, constraints: &[RatioConstraint]) -> Proportions {
        match resolve(ingredient_count, constraints).unwrap() {
            Resolution::Solved(proportions) => proportions,
            Resolution::NoUniqueSolution => panic!("expected a unique solution"),
        }
    }

    #[test]
    fn test_sample_input() {
        let constraints = vec![
            RatioConstraint::new(0, 1, 9, 4),
            RatioConstraint::new(2, 1, 1, 2),
        ];
        let proportions = resolved(3, &constraints);
        assert_close(proportions.get(0).unwrap(), 9.0 / 15.0);
        assert_close(proportions.get(1).unwrap(), 4.0 / 15.0);
        assert_close(proportions.get(2).unwrap(), 2.0 / 15.0);
    }

    #[test]
    fn test_disconnected_graph() {
        // node 3 is untouched; the third edge duplicates coverage of {0, 1, 2}
        let constraints = vec![
            RatioConstraint::new(0, 1, 1, 1),
            RatioConstraint::new(1, 2, 1, 1),
            RatioConstraint::new(0, 2, 1, 1),
        ];
        assert_eq!(
            resolve(4, &constraints).unwrap(),
            Resolution::NoUniqueSolution
        );
    }

    #[test]
    fn test_duplicate_edge() {
        let constraints = vec![
            RatioConstraint::new(0, 1, 1, 1),
            RatioConstraint::new(0, 1, 1, 1),
        ];
        assert_eq!(
            resolve(3, &constraints).unwrap(),
            Resolution::NoUniqueSolution
        );
    }

    #[test]
    fn test_self_loop_edge() {
        let constraints = vec![
            RatioConstraint::new(0, 0, 1, 1),
            RatioConstraint::new(1, 2, 1, 1),
        ];
        assert_eq!(
            resolve(3, &constraints).unwrap(),
            Resolution::NoUniqueSolution
        );
    }

    #[test]
    fn test_incidence_preserves_input_order() {
        let constraints = vec![
            RatioConstraint::new(0, 1, 1, 2),
            RatioConstraint::new(2, 0, 3, 4),
            RatioConstraint::new(0, 3, 5, 6),
        ];
        let graph = ConstraintGraph::build(4, &constraints).unwrap();
        assert_eq!(graph.incident(0), &[0, 1, 2]);
        assert_eq!(graph.incident(2), &[1]);
        assert_eq!(graph.ingredient_count(), 4);
    }

    #[test]
    fn test_build_rejects_out_of_range_index() {
        let constraints = vec![
            RatioConstraint::new(0, 1, 1, 1),
            RatioConstraint::new(1, 9, 1, 1),
        ];
        let err = ConstraintGraph::build(3, &constraints).unwrap_err();
        assert!(matches!(err, InputError::IndexOutOfRange { index: 9, .. }));
    }

    #[test]
    fn test_random_spanning_trees() {
        for ingredient_count in [3, 4, 7, 20, 50, 199] {
            for seed in 0..10 {
                let constraints = generate_random_tree(ingredient_count, seed);
                let proportions = resolved(ingredient_count, &constraints);

                assert_eq!(proportions.len(), ingredient_count);
                assert!((proportions.sum() - 1.0).abs() < 1e-9);
                assert!(proportions.as_slice().iter().all(|&p| p > 0.0));
                assert_eq!(proportions.check_constraints(constraints.iter()), None);

                // independent reachability oracle
                let mut neighbors = vec![Vec::new(); ingredient_count];
                for constraint in &constraints {
                    neighbors[constraint.one.index].push(constraint.two.index);
                    neighbors[constraint.two.index].push(constraint.one.index);
                }
                let reached = bfs_reach(0usize, |&index| neighbors[index].clone()).count();
                assert_eq!(reached, ingredient_count);
            }
        }
    }

    #[test]
    fn test_order_independence() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for seed in 0..20 {
            let mut constraints = generate_random_tree(12, seed);
            let baseline = resolved(12, &constraints);
            for _ in 0..5 {
                constraints.shuffle(&mut rng);
                let reordered = resolved(12, &constraints);
                for index in 0..12 {
                    assert_close(reordered.get(index).unwrap(), baseline.get(index).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_anchor_independence() {
        for seed in 0..20 {
            let constraints = generate_random_tree(9, seed);
            let graph = ConstraintGraph::build(9, &constraints).unwrap();
            let baseline = resolved(9, &constraints);
            for anchor in 0..9 {
                let from_anchor = match graph.resolve_proportions_from(anchor) {
                    Resolution::Solved(proportions) => proportions,
                    Resolution::NoUniqueSolution => panic!("anchor {anchor} found no solution"),
                };
                for index in 0..9 {
                    assert_close(
                        from_anchor.get(index).unwrap(),
                        baseline.get(index).unwrap(),
                    );
                }
            }
        }
    }

    #[test]
    fn test_duplicated_random_edge_breaks_uniqueness() {
        for seed in 0..20 {
            let mut constraints = generate_random_tree(10, seed);
            // overwrite one edge with a copy of another; some node loses its
            // only connection
            constraints[3] = constraints[5];
            assert_eq!(
                resolve(10, &constraints).unwrap(),
                Resolution::NoUniqueSolution
            );
        }
    }

    #[test]
    fn test_idempotence() {
        let constraints = generate_random_tree(30, 42);
        let first = resolve(30, &constraints).unwrap();
        let second = resolve(30, &constraints).unwrap();
        assert_eq!(first, second);
    }
}
