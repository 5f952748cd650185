//! Parsing and solving traits implemented by every puzzle

use crate::error::{ParseError, SolveError};

/// Turns raw input into the data every part works on.
///
/// `SharedData<'a>` may borrow from the input (`Vec<&'a str>`, token lists)
/// or own everything; parts receive it mutably so one part can leave
/// intermediate results behind for the next.
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Words;
///
/// impl AocParser for Words {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
///         Ok(input.split_whitespace().collect())
///     }
/// }
///
/// assert_eq!(Words::parse("a b  c").unwrap(), vec!["a", "b", "c"]);
/// ```
pub trait AocParser {
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solution of part `N`.
///
/// Implement once per part and let `#[derive(AocSolver)]` generate the
/// [`Solver`] dispatch.
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Sum;
///
/// impl AocParser for Sum {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Sum {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.iter().sum::<u32>().to_string())
///     }
/// }
///
/// let mut shared = Sum::parse("1\n2\n3").unwrap();
/// assert_eq!(<Sum as PartSolver<1>>::solve(&mut shared).unwrap(), "6");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete puzzle solver with `PARTS` parts.
pub trait Solver: AocParser {
    /// Number of parts, numbered from 1
    const PARTS: u8;

    /// Solve `part` against the shared data.
    ///
    /// Returns `SolveError::PartOutOfRange` for parts the solver does not have.
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Bounds-checked entry point used by solver instances
pub trait SolverExt: Solver {
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if part == 0 || part > Self::PARTS {
            return Err(SolveError::PartOutOfRange(part));
        }
        Self::solve_part(shared, part)
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
