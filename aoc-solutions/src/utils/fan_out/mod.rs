//! Parallel fan-out / reduce over independent work items
//!
//! A pass takes an ordered batch of items, evaluates each one in its own
//! rayon task, and folds the results into one aggregate on the calling
//! thread.
//!
//! - [`FanOut`]: the reducer, configured with a pool and a [`FailurePolicy`]
//! - [`Reduction`]: the aggregate plus how many items were folded or skipped
//! - [`ItemError`]: a typed failure pointing at the item that caused it
//!
//! Evaluation is fallible by signature. A failing item never contributes a
//! placeholder value: it either aborts the pass (`FailFast`) or is listed in
//! [`Reduction::skipped`] (`Skip`).
//!
//! # Example: skip and report
//!
//! ```rust
//! use aoc_solutions::utils::fan_out::{FailurePolicy, FanOut};
//!
//! let fields = vec!["7", "x", "5"];
//! let reduction = FanOut::new()
//!     .policy(FailurePolicy::Skip)
//!     .sum(fields, |f| f.parse::<i64>())
//!     .unwrap();
//!
//! assert_eq!(reduction.aggregate, 12);
//! assert_eq!(reduction.skipped.len(), 1);
//! assert_eq!(reduction.skipped[0].index, 1);
//! ```

mod outcome;
mod reducer;

#[cfg(test)]
mod tests;

pub use outcome::{FailurePolicy, ItemError, Reduction};
pub use reducer::FanOut;
