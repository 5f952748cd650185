//! Advent of Code solver framework
//!
//! Each puzzle is a type implementing [`AocParser`] (input → shared data)
//! and one [`PartSolver<N>`] per part. `#[derive(AocSolver)]` ties the
//! parts together into a [`Solver`], and `#[derive(AutoRegisterSolver)]`
//! submits it to the plugin list so the runner can find it by year and day.
//!
//! ```
//! use aoc_solver::{
//!     AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder,
//! };
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
//!     }
//! }
//!
//! let registry = aoc_solver::RegisterableSolver::register_with(
//!     &Depths,
//!     SolverRegistryBuilder::new(),
//!     2021,
//!     1,
//! )
//! .unwrap()
//! .build();
//!
//! let mut solver = registry.create_solver(2021, 1, "3\n9\n4").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "16");
//! assert_eq!(solver.solve(2).unwrap().answer, "9");
//! ```

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the code generated by `AutoRegisterSolver`
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
