//! Failure policy, per-item errors and reduction results.

use thiserror::Error;

/// What the reducer does when `evaluate` fails for an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return the first error and cancel tasks that have not started yet.
    #[default]
    FailFast,
    /// Leave the item out of the aggregate and record it in [`Reduction::skipped`].
    Skip,
}

/// Failure of a single work item, tagged with its dispatch position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("work item {index} failed: {error}")]
pub struct ItemError<E> {
    pub index: usize,
    #[source]
    pub error: E,
}

/// Finalized aggregate of a fan-out pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction<A, E> {
    pub aggregate: A,
    /// Items whose result was folded into `aggregate`
    pub evaluated: usize,
    /// Items left out under [`FailurePolicy::Skip`], in arrival order
    pub skipped: Vec<ItemError<E>>,
}

impl<A, E> Reduction<A, E> {
    pub(super) fn identity(aggregate: A) -> Self {
        Self {
            aggregate,
            evaluated: 0,
            skipped: Vec::new(),
        }
    }

    /// Number of items accounted for, folded or skipped
    pub fn dispatched(&self) -> usize {
        self.evaluated + self.skipped.len()
    }

    pub fn into_aggregate(self) -> A {
        self.aggregate
    }
}

/// Message a task sends to the collector; exactly one per item.
pub(super) enum Outcome<R, E> {
    Evaluated(Result<R, E>),
    /// Not evaluated because an earlier item failed under `FailFast`
    Cancelled,
}
