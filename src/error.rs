use std::io;

use thiserror::Error;

/// Malformed input. Distinct from [`Resolution::NoUniqueSolution`]: a system
/// that is well formed but unsolvable is a value, not an error.
///
/// [`Resolution::NoUniqueSolution`]: crate::Resolution::NoUniqueSolution
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input")]
    Io(#[from] io::Error),
    #[error("expected an integer, found `{token}`")]
    InvalidToken { token: String },
    #[error("input ended before the problem was complete")]
    UnexpectedEnd,
    #[error("ingredient count must satisfy 2 < n < 200, got {ingredient_count}")]
    IngredientCountOutOfRange { ingredient_count: usize },
    #[error("expected {expected} constraints for {ingredient_count} ingredients, got {got}")]
    ConstraintCount {
        ingredient_count: usize,
        expected: usize,
        got: usize,
    },
    #[error("ingredient index {index} is out of range for {ingredient_count} ingredients")]
    IndexOutOfRange {
        index: usize,
        ingredient_count: usize,
    },
    #[error("ingredient amount must satisfy 0 < amount < 10, got {amount}")]
    AmountOutOfRange { amount: i64 },
}
