//! Solver for systems of pairwise ratio constraints.
//!
//! A mixture of `n` ingredients is described by `n - 1` constraints of the
//! form "ingredient `i` : ingredient `j` = `a` : `b`". When the constraints
//! form a spanning tree over the ingredients they fix every proportion
//! uniquely; [`resolve`] computes those proportions, normalized to sum to
//! 1.0, and reports [`Resolution::NoUniqueSolution`] otherwise.

mod common;
mod error;
mod graph;
mod input;
mod merge;
mod solution;

pub use common::{Ingredient, RatioConstraint, MAX_AMOUNT, MAX_INGREDIENTS, MIN_INGREDIENTS};
pub use error::InputError;
pub use graph::ConstraintGraph;
pub use input::{parse_problem, read_problem, Problem};
pub use merge::resolve_by_merging;
pub use solution::{Proportions, ProportionsDisplay, Resolution, RATIO_TOLERANCE};

/// Resolves the mixing proportions of `ingredient_count` ingredients from
/// their pairwise ratio constraints.
pub fn resolve(
    ingredient_count: usize,
    constraints: &[RatioConstraint],
) -> Result<Resolution, InputError> {
    let graph = ConstraintGraph::build(ingredient_count, constraints)?;
    Ok(graph.resolve_proportions())
}
