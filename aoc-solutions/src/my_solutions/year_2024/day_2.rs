use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

use crate::utils::fan_out::FanOut;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 2, tags = ["2024", "sequences", "fan-out"])]
pub struct Solver;

/// Allowed step between adjacent levels
const MAX_STEP: u32 = 3;

/// One line of reactor levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report(Vec<i32>);

impl Report {
    pub fn new(levels: Vec<i32>) -> Self {
        Self(levels)
    }

    /// Monotonic in one direction with every step in `1..=MAX_STEP`.
    ///
    /// A report with fewer than two levels has no direction and is never safe.
    pub fn is_safe(&self) -> bool {
        levels_are_safe(self.0.iter().copied())
    }

    /// Safe as is, or after removing exactly one level
    pub fn tolerates_single_fault(&self) -> bool {
        self.is_safe()
            || (0..self.0.len()).any(|skip| {
                levels_are_safe(
                    self.0
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != skip)
                        .map(|(_, level)| *level),
                )
            })
    }
}

fn levels_are_safe(levels: impl Iterator<Item = i32>) -> bool {
    let mut levels = levels.peekable();
    let Some(mut previous) = levels.next() else {
        return false;
    };
    if levels.peek().is_none() {
        return false;
    }

    let mut direction = None;
    for level in levels {
        if !(1..=MAX_STEP).contains(&level.abs_diff(previous)) {
            return false;
        }
        let step = level.cmp(&previous);
        match direction {
            None => direction = Some(step),
            Some(expected) if expected != step => return false,
            Some(_) => {}
        }
        previous = level;
    }
    true
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Report>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let reports = input
            .trim()
            .lines()
            .enumerate()
            .map(|(line_idx, line)| {
                parse_report(line).with_context(|| format!("(line {})", line_idx + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;

        debug!(reports = reports.len(), "parsed reports");
        Ok(reports)
    }
}

fn parse_report(line: &str) -> anyhow::Result<Report> {
    line.split(' ')
        .map(|level| {
            level
                .parse::<i32>()
                .map_err(|e| anyhow!("level {level:?} is not a number: {e}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map(Report::new)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe = FanOut::new().count_true(shared.iter().collect(), Report::is_safe);
        Ok(safe.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let safe =
            FanOut::new().count_true(shared.iter().collect(), Report::tolerates_single_fault);
        Ok(safe.to_string())
    }
}
