use std::num::ParseIntError;
use std::sync::LazyLock;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::utils::fan_out::FanOut;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 3, tags = ["2024", "regex", "fan-out"])]
pub struct Solver;

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mul\(\d{1,3},\d{1,3}\)|do\(\)|don't\(\)").expect("instruction pattern is valid")
});

/// A recognised token of the corrupted memory, borrowing the `mul(..)` text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
    Mul(&'a str),
    Do,
    Dont,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MulState {
    Enabled,
    Disabled,
}

impl MulState {
    fn next(self, instruction: &Instruction<'_>) -> Self {
        match instruction {
            Instruction::Do => MulState::Enabled,
            Instruction::Dont => MulState::Disabled,
            Instruction::Mul(_) => self,
        }
    }
}

#[derive(Debug, Error)]
pub enum MulError {
    #[error("malformed multiplication {0:?}")]
    Malformed(String),
    #[error("operand {operand:?} of {expression:?}: {source}")]
    Operand {
        expression: String,
        operand: String,
        #[source]
        source: ParseIntError,
    },
    #[error("product of {expression:?} does not fit in u64")]
    Overflow { expression: String },
    #[error("sum of products does not fit in u64")]
    SumOverflow,
}

/// Product of a `mul(a,b)` expression
pub fn evaluate_mul(expression: &str) -> Result<u64, MulError> {
    let (left, right) = expression
        .strip_prefix("mul(")
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(|operands| operands.split_once(','))
        .ok_or_else(|| MulError::Malformed(expression.to_string()))?;

    let operand = |text: &str| {
        text.parse::<u64>().map_err(|source| MulError::Operand {
            expression: expression.to_string(),
            operand: text.to_string(),
            source,
        })
    };
    operand(left)?
        .checked_mul(operand(right)?)
        .ok_or_else(|| MulError::Overflow {
            expression: expression.to_string(),
        })
}

/// `mul` expressions not switched off by a preceding `don't()`
pub fn enabled_muls<'a>(instructions: &[Instruction<'a>]) -> Vec<&'a str> {
    let (_, kept) = instructions.iter().fold(
        (MulState::Enabled, Vec::new()),
        |(state, mut kept), instruction| {
            if let (MulState::Enabled, Instruction::Mul(expression)) = (state, instruction) {
                kept.push(*expression);
            }
            (state.next(instruction), kept)
        },
    );
    kept
}

fn all_muls<'a>(instructions: &[Instruction<'a>]) -> Vec<&'a str> {
    instructions
        .iter()
        .filter_map(|instruction| match instruction {
            Instruction::Mul(expression) => Some(*expression),
            _ => None,
        })
        .collect()
}

fn sum_of_products(expressions: Vec<&str>) -> Result<String, SolveError> {
    let reduction = FanOut::new()
        .reduce(expressions, Some(0u64), evaluate_mul, |total, product| {
            total.and_then(|t| t.checked_add(product))
        })
        .map_err(SolveError::failed)?;
    let total = reduction
        .aggregate
        .ok_or(MulError::SumOverflow)
        .map_err(SolveError::failed)?;
    Ok(total.to_string())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction<'a>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let instructions: Vec<_> = INSTRUCTION
            .find_iter(input)
            .map(|m| match m.as_str() {
                "do()" => Instruction::Do,
                "don't()" => Instruction::Dont,
                expression => Instruction::Mul(expression),
            })
            .collect();

        debug!(instructions = instructions.len(), "scanned memory");
        Ok(instructions)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_of_products(all_muls(shared))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let enabled = enabled_muls(shared);
        debug!(
            enabled = enabled.len(),
            total = shared.len(),
            "applied do/don't toggles"
        );
        sum_of_products(enabled)
    }
}
