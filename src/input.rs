use std::io::{BufRead, Read};

use crate::common::{RatioConstraint, MAX_AMOUNT, MAX_INGREDIENTS, MIN_INGREDIENTS};
use crate::error::InputError;
use crate::solution::Resolution;

/// A fully validated problem instance: the ingredient count and its n - 1
/// ratio constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub ingredient_count: usize,
    pub constraints: Vec<RatioConstraint>,
}

impl Problem {
    pub fn resolve(&self) -> Result<Resolution, InputError> {
        crate::resolve(self.ingredient_count, &self.constraints)
    }
}

/// Reads a problem from whitespace-separated integer tokens: the ingredient
/// count first, then `index1 index2 amount1 amount2` per constraint. Line
/// breaks carry no meaning.
pub fn read_problem<R: BufRead>(mut reader: R) -> Result<Problem, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_problem(&text)
}

pub fn parse_problem(text: &str) -> Result<Problem, InputError> {
    let mut tokens = text.split_whitespace();
    let ingredient_count = next_usize(&mut tokens)?;
    if !(MIN_INGREDIENTS..=MAX_INGREDIENTS).contains(&ingredient_count) {
        return Err(InputError::IngredientCountOutOfRange { ingredient_count });
    }
    let mut constraints = Vec::with_capacity(ingredient_count - 1);
    for _ in 0..ingredient_count - 1 {
        let index1 = next_usize(&mut tokens)?;
        let index2 = next_usize(&mut tokens)?;
        let amount1 = next_amount(&mut tokens)?;
        let amount2 = next_amount(&mut tokens)?;
        for index in [index1, index2] {
            if index >= ingredient_count {
                return Err(InputError::IndexOutOfRange {
                    index,
                    ingredient_count,
                });
            }
        }
        constraints.push(RatioConstraint::new(index1, index2, amount1, amount2));
    }
    Ok(Problem {
        ingredient_count,
        constraints,
    })
}

fn next_token<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Result<&'a str, InputError> {
    tokens.next().ok_or(InputError::UnexpectedEnd)
}

fn next_usize<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Result<usize, InputError> {
    let token = next_token(tokens)?;
    token.parse().map_err(|_| InputError::InvalidToken {
        token: token.to_owned(),
    })
}

fn next_amount<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Result<u32, InputError> {
    let token = next_token(tokens)?;
    let amount: i64 = token.parse().map_err(|_| InputError::InvalidToken {
        token: token.to_owned(),
    })?;
    if !(1..=i64::from(MAX_AMOUNT)).contains(&amount) {
        return Err(InputError::AmountOutOfRange { amount });
    }
    Ok(amount as u32)
}
