//! Error types shared by solvers, instances and the registry

use thiserror::Error;

/// Failure to turn raw puzzle input into a solver's shared data
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// A line or token does not have the expected shape
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// The input ended before all required data was read
    #[error("Missing data: {0}")]
    MissingData(String),
    #[error("Parse error: {0}")]
    Other(String),
}

/// Failure while computing one part
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// Part number is zero or above the solver's `PARTS`
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap any error as a solve failure
    pub fn failed<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::SolveFailed(Box::new(err))
    }
}

/// Error from creating or running a solver through the registry
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Solver not found for year {0} day {1}")]
    NotFound(u16, u8),
    /// Year or day falls outside the supported storage range
    #[error("Year {0} day {1} is outside the supported range")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Error raised while building a registry
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    #[error("Duplicate solver registration for year {0} day {1}")]
    DuplicateSolver(u16, u8),
    #[error("Cannot register year {0} day {1}: outside the supported range")]
    InvalidYearDay(u16, u8),
}
