use std::fmt::{self, Display};

use crate::common::RatioConstraint;

/// Relative tolerance used when checking a ratio constraint against
/// normalized proportions.
pub const RATIO_TOLERANCE: f64 = 1e-9;

const DEFAULT_PRECISION: usize = 4;

/// Outcome of a resolution run. There is no partial success: either every
/// ingredient's proportion is fixed, or none are reported.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Solved(Proportions),
    NoUniqueSolution,
}

impl Resolution {
    pub fn proportions(&self) -> Option<&Proportions> {
        match self {
            Resolution::Solved(proportions) => Some(proportions),
            Resolution::NoUniqueSolution => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Resolution::Solved(_))
    }
}

/// Normalized proportions, index-aligned with the ingredients. Entries are
/// positive and sum to 1.0 up to rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Proportions(Vec<f64>);

impl Proportions {
    /// Normalizes raw positive weights into proportions.
    pub(crate) fn normalize(mut weights: Vec<f64>) -> Self {
        let sum: f64 = weights.iter().sum();
        debug_assert!(sum > 0.0);
        for weight in &mut weights {
            *weight /= sum;
        }
        Proportions(weights)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Checks that these proportions respect a single ratio constraint,
    /// i.e. p[one] : p[two] matches one.amount : two.amount up to rounding.
    pub fn check_constraint(&self, constraint: &RatioConstraint) -> bool {
        let (Some(p_one), Some(p_two)) = (
            self.get(constraint.one.index),
            self.get(constraint.two.index),
        ) else {
            return false;
        };
        let lhs = p_one * f64::from(constraint.two.amount);
        let rhs = p_two * f64::from(constraint.one.amount);
        (lhs - rhs).abs() <= RATIO_TOLERANCE * lhs.max(rhs)
    }

    /// Returns the first violated constraint, if any.
    pub fn check_constraints<'a, I: Iterator<Item = &'a RatioConstraint>>(
        &self,
        mut constraints: I,
    ) -> Option<&'a RatioConstraint> {
        constraints.find(|constraint| !self.check_constraint(constraint))
    }

    pub fn display_with_precision(&self, precision: usize) -> ProportionsDisplay<'_> {
        ProportionsDisplay {
            proportions: self,
            precision,
        }
    }
}

pub struct ProportionsDisplay<'a> {
    proportions: &'a Proportions,
    precision: usize,
}

impl Display for ProportionsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (position, proportion) in self.proportions.as_slice().iter().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.*}", self.precision, proportion)?;
        }
        write!(f, "]")
    }
}

impl Display for Proportions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_with_precision(DEFAULT_PRECISION).fmt(f)
    }
}
