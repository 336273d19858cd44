use std::fmt::{self, Display};

use crate::error::InputError;

/// Smallest legal ingredient count (the problem requires 2 < n).
pub const MIN_INGREDIENTS: usize = 3;
/// Largest legal ingredient count (the problem requires n < 200).
pub const MAX_INGREDIENTS: usize = 199;
/// Largest legal constraint amount (the problem requires 0 < amount < 10).
pub const MAX_AMOUNT: u32 = 9;

/// One side of a ratio constraint: an ingredient index together with its
/// relative amount on that constraint.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct Ingredient {
    pub index: usize,
    pub amount: u32,
}

#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RatioConstraint {
    // one.amount : two.amount
    pub one: Ingredient,
    pub two: Ingredient,
}

impl RatioConstraint {
    pub fn new(index1: usize, index2: usize, amount1: u32, amount2: u32) -> Self {
        RatioConstraint {
            one: Ingredient {
                index: index1,
                amount: amount1,
            },
            two: Ingredient {
                index: index2,
                amount: amount2,
            },
        }
    }

    pub fn touches(&self, index: usize) -> bool {
        self.one.index == index || self.two.index == index
    }

    /// Splits the constraint into the side at `index` and the opposite side.
    /// `index` must touch the constraint.
    pub fn oriented_from(&self, index: usize) -> (Ingredient, Ingredient) {
        debug_assert!(self.touches(index));
        if self.one.index == index {
            (self.one, self.two)
        } else {
            (self.two, self.one)
        }
    }
}

impl Display for RatioConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} : #{} = {} : {}",
            self.one.index, self.two.index, self.one.amount, self.two.amount
        )
    }
}

/// Shape checks shared by both resolvers: exactly n - 1 constraints, indices
/// in range, amounts positive. Range violations are input errors, never a
/// "no unique solution" verdict.
pub(crate) fn validate(
    ingredient_count: usize,
    constraints: &[RatioConstraint],
) -> Result<(), InputError> {
    if constraints.len() + 1 != ingredient_count {
        return Err(InputError::ConstraintCount {
            ingredient_count,
            expected: ingredient_count.saturating_sub(1),
            got: constraints.len(),
        });
    }
    for constraint in constraints {
        for side in [constraint.one, constraint.two] {
            if side.index >= ingredient_count {
                return Err(InputError::IndexOutOfRange {
                    index: side.index,
                    ingredient_count,
                });
            }
            if side.amount == 0 {
                return Err(InputError::AmountOutOfRange { amount: 0 });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let constraint = RatioConstraint::new(0, 1, 9, 4);
        assert_eq!(constraint.to_string(), "#0 : #1 = 9 : 4");
    }

    #[test]
    fn test_oriented_from() {
        let constraint = RatioConstraint::new(2, 1, 1, 2);
        let (current, adjacent) = constraint.oriented_from(2);
        assert_eq!((current.index, current.amount), (2, 1));
        assert_eq!((adjacent.index, adjacent.amount), (1, 2));
        let (current, adjacent) = constraint.oriented_from(1);
        assert_eq!((current.index, current.amount), (1, 2));
        assert_eq!((adjacent.index, adjacent.amount), (2, 1));
    }

    #[test]
    fn test_validate_constraint_count() {
        let constraints = vec![RatioConstraint::new(0, 1, 1, 1)];
        let err = validate(3, &constraints).unwrap_err();
        assert!(matches!(
            err,
            InputError::ConstraintCount {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_index_out_of_range() {
        let constraints = vec![
            RatioConstraint::new(0, 1, 1, 1),
            RatioConstraint::new(1, 3, 1, 1),
        ];
        let err = validate(3, &constraints).unwrap_err();
        assert!(matches!(err, InputError::IndexOutOfRange { index: 3, .. }));
    }

    #[test]
    fn test_validate_zero_amount() {
        let constraints = vec![
            RatioConstraint::new(0, 1, 1, 1),
            RatioConstraint::new(1, 2, 0, 1),
        ];
        let err = validate(3, &constraints).unwrap_err();
        assert!(matches!(err, InputError::AmountOutOfRange { amount: 0 }));
    }
}
