use std::collections::HashMap;

use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 1, tags = ["2024", "lists"])]
pub struct Solver;

/// Both location columns, each sorted ascending
#[derive(Debug)]
pub struct SharedData {
    left: Vec<i64>,
    right: Vec<i64>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (mut left, mut right): (Vec<i64>, Vec<i64>) = input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                parse_pair(line).with_context(|| format!("(line {}) {:?}", line_idx + 1, line))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?
            .into_iter()
            .unzip();

        left.sort_unstable();
        right.sort_unstable();
        debug!(pairs = left.len(), "parsed location lists");

        Ok(SharedData { left, right })
    }
}

fn parse_pair(line: &str) -> anyhow::Result<(i64, i64)> {
    let mut fields = line.split_whitespace();
    let (Some(left), Some(right), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(anyhow!("expected exactly two columns"));
    };
    Ok((left.parse()?, right.parse()?))
}

/// Sum of pairwise distances between two already sorted columns
pub fn total_distance(left: &[i64], right: &[i64]) -> u64 {
    left.iter().zip(right).map(|(l, r)| l.abs_diff(*r)).sum()
}

/// Sum of every left value weighted by how often it appears on the right
pub fn similarity_score(left: &[i64], right: &[i64]) -> i64 {
    let occurrences = right.iter().fold(HashMap::new(), |mut counts, value| {
        *counts.entry(*value).or_insert(0i64) += 1;
        counts
    });
    debug!(distinct = occurrences.len(), ?occurrences, "right column occurrences");

    left.iter()
        .map(|value| value * occurrences.get(value).copied().unwrap_or(0))
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_distance(&shared.left, &shared.right).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(similarity_score(&shared.left, &shared.right).to_string())
    }
}
