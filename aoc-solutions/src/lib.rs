//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions live under `my_solutions::year_YYYY::day_D` and register
//! themselves with `#[derive(AutoRegisterSolver)]`; linking this crate is
//! enough for the runner to find them. Helpers shared between days live in
//! [`utils`].

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
