use std::mem;

use petgraph::unionfind::UnionFind;
use tracing::debug;

use crate::common::{validate, Ingredient, RatioConstraint};
use crate::error::InputError;
use crate::solution::{Proportions, Resolution};

/// Resolves proportions without a traversal: constraints are folded in one at
/// a time, each either seeding a new group, attaching a loose ingredient to
/// an existing group, or merging two groups under a common unit. Agrees with
/// [`crate::resolve`] on every input.
pub fn resolve_by_merging(
    ingredient_count: usize,
    constraints: &[RatioConstraint],
) -> Result<Resolution, InputError> {
    validate(ingredient_count, constraints)?;
    let mut groups = Groups::new(ingredient_count);
    for constraint in constraints {
        if !groups.add_constraint(constraint) {
            debug!(%constraint, "constraint joins two ingredients already in one group");
            return Ok(Resolution::NoUniqueSolution);
        }
    }
    if !groups.is_single_group() {
        debug!("constraints leave more than one ingredient group");
        return Ok(Resolution::NoUniqueSolution);
    }
    Ok(Resolution::Solved(groups.into_proportions()))
}

/// Disjoint ingredient groups, each carrying weights in its own unit.
struct Groups {
    sets: UnionFind<usize>,
    weights: Vec<f64>,
    assigned: Vec<bool>,
    // member lists; meaningful only at current root indices
    members: Vec<Vec<usize>>,
}

impl Groups {
    fn new(ingredient_count: usize) -> Self {
        Groups {
            sets: UnionFind::new(ingredient_count),
            weights: vec![0.0; ingredient_count],
            assigned: vec![false; ingredient_count],
            members: (0..ingredient_count).map(|index| vec![index]).collect(),
        }
    }

    /// Folds one constraint in. `false` when its endpoints already share a
    /// group: with n - 1 constraints such an edge is wasted and some
    /// ingredient must end up unconnected.
    fn add_constraint(&mut self, constraint: &RatioConstraint) -> bool {
        let one = constraint.one;
        let two = constraint.two;
        if self.sets.equiv(one.index, two.index) {
            // also covers self-loops and duplicate edges
            return false;
        }
        match (self.assigned[one.index], self.assigned[two.index]) {
            (false, false) => {
                self.weights[one.index] = f64::from(one.amount);
                self.weights[two.index] = f64::from(two.amount);
            }
            (true, false) => self.attach(one, two),
            (false, true) => self.attach(two, one),
            (true, true) => {
                // cross-rescale both groups into a common unit
                let weight_one = self.weights[one.index];
                let weight_two = self.weights[two.index];
                self.rescale_group(one.index, f64::from(one.amount) * weight_two);
                self.rescale_group(two.index, f64::from(two.amount) * weight_one);
            }
        }
        self.assigned[one.index] = true;
        self.assigned[two.index] = true;
        self.merge_members(one.index, two.index);
        true
    }

    /// Adds `loose` to the group of `existing`, rescaling that group so the
    /// new pair respects the constraint's amounts.
    fn attach(&mut self, existing: Ingredient, loose: Ingredient) {
        let existing_weight = self.weights[existing.index];
        self.rescale_group(existing.index, f64::from(existing.amount));
        self.weights[loose.index] = f64::from(loose.amount) * existing_weight;
    }

    fn rescale_group(&mut self, member: usize, factor: f64) {
        let root = self.sets.find(member);
        for &index in &self.members[root] {
            self.weights[index] *= factor;
        }
    }

    fn merge_members(&mut self, a: usize, b: usize) {
        let root_a = self.sets.find(a);
        let root_b = self.sets.find(b);
        self.sets.union(a, b);
        let mut merged = mem::take(&mut self.members[root_a]);
        merged.append(&mut mem::take(&mut self.members[root_b]));
        let merged_root = self.sets.find(a);
        self.members[merged_root] = merged;
    }

    fn is_single_group(&self) -> bool {
        (1..self.weights.len()).all(|index| self.sets.equiv(0, index))
    }

    fn into_proportions(self) -> Proportions {
        Proportions::normalize(self.weights)
    }
}
