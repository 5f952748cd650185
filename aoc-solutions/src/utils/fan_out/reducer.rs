//! Fan-out over a rayon pool, folded by a single collector.

use std::convert::Infallible;
use std::fmt::Display;
use std::ops::Add;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use rayon::{Scope, ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::{debug, warn};

use super::outcome::{FailurePolicy, ItemError, Outcome, Reduction};

/// Evaluates independent work items in parallel and folds their results.
///
/// One task is spawned per item, but tasks run on a bounded rayon pool:
/// either the pool given to [`FanOut::with_pool`] or, by default, the pool
/// the caller is running on (the global pool outside of any `install`).
///
/// Results travel over an unbounded channel, so a finished task never waits
/// for the collector. The collector folds exactly one outcome per item, in
/// arrival order; use a commutative and associative `combine` to get the
/// same aggregate on every run.
///
/// ```
/// use aoc_solutions::utils::fan_out::FanOut;
///
/// let lines = vec!["3", "4", "5"];
/// let total = FanOut::new()
///     .sum(lines, |line| line.parse::<u32>())
///     .unwrap();
/// assert_eq!(total.aggregate, 12);
/// assert_eq!(total.dispatched(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FanOut {
    pool: Option<Arc<ThreadPool>>,
    policy: FailurePolicy,
}

impl FanOut {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run tasks on an existing pool
    pub fn with_pool(pool: Arc<ThreadPool>) -> Self {
        Self {
            pool: Some(pool),
            policy: FailurePolicy::default(),
        }
    }

    /// Run tasks on a dedicated pool of `threads` workers
    pub fn with_threads(threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("fan-out-{i}"))
            .build()?;
        Ok(Self::with_pool(Arc::new(pool)))
    }

    pub fn policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Worker threads available to this fan-out
    pub fn parallelism(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |pool| pool.current_num_threads())
    }

    /// Evaluate every item concurrently and fold the successes into `identity`.
    ///
    /// With no items, returns `identity` right away. Under
    /// [`FailurePolicy::FailFast`] the first reported error is returned and
    /// items that had not started are never evaluated; under
    /// [`FailurePolicy::Skip`] failing items are recorded in the result.
    pub fn reduce<T, R, E, A, F, C>(
        &self,
        items: Vec<T>,
        identity: A,
        evaluate: F,
        combine: C,
    ) -> Result<Reduction<A, E>, ItemError<E>>
    where
        T: Send,
        R: Send,
        E: Send + Display,
        F: Fn(T) -> Result<R, E> + Sync,
        C: FnMut(A, R) -> A,
    {
        let dispatched = items.len();
        if dispatched == 0 {
            return Ok(Reduction::identity(identity));
        }

        debug!(
            items = dispatched,
            threads = self.parallelism(),
            policy = ?self.policy,
            "fan-out dispatch"
        );

        let (tx, rx) = mpsc::channel();
        let cancelled = AtomicBool::new(false);
        let policy = self.policy;
        let evaluate = &evaluate;

        // Joining the scope before draining keeps the collector off the pool's workers.
        match &self.pool {
            Some(pool) => {
                pool.scope(|scope| spawn_all(scope, items, evaluate, &cancelled, policy, tx))
            }
            None => rayon::scope(|scope| spawn_all(scope, items, evaluate, &cancelled, policy, tx)),
        }

        collect(rx, dispatched, policy, identity, combine)
    }

    /// Sum the evaluated values with `R`'s `+`.
    ///
    /// Integer overflow follows `+` (a panic in debug builds); use
    /// [`FanOut::reduce`] with a checked combine when totals may not fit.
    pub fn sum<T, R, E, F>(
        &self,
        items: Vec<T>,
        evaluate: F,
    ) -> Result<Reduction<R, E>, ItemError<E>>
    where
        T: Send,
        R: Add<Output = R> + Default + Send,
        E: Send + Display,
        F: Fn(T) -> Result<R, E> + Sync,
    {
        self.reduce(items, R::default(), evaluate, |acc, value| acc + value)
    }

    /// Count the items for which `predicate` returns `Ok(true)`
    pub fn count<T, E, F>(
        &self,
        items: Vec<T>,
        predicate: F,
    ) -> Result<Reduction<usize, E>, ItemError<E>>
    where
        T: Send,
        E: Send + Display,
        F: Fn(T) -> Result<bool, E> + Sync,
    {
        self.reduce(items, 0, predicate, |count, hit| count + usize::from(hit))
    }

    /// Count the items matching an infallible predicate
    pub fn count_true<T, F>(&self, items: Vec<T>, predicate: F) -> usize
    where
        T: Send,
        F: Fn(T) -> bool + Sync,
    {
        match self.count(items, |item| Ok::<_, Infallible>(predicate(item))) {
            Ok(reduction) => reduction.aggregate,
            Err(ItemError { error, .. }) => match error {},
        }
    }
}

fn spawn_all<'scope, T, R, E, F>(
    scope: &Scope<'scope>,
    items: Vec<T>,
    evaluate: &'scope F,
    cancelled: &'scope AtomicBool,
    policy: FailurePolicy,
    tx: Sender<(usize, Outcome<R, E>)>,
) where
    T: Send + 'scope,
    R: Send + 'scope,
    E: Send + 'scope,
    F: Fn(T) -> Result<R, E> + Sync,
{
    for (index, item) in items.into_iter().enumerate() {
        let tx = tx.clone();
        scope.spawn(move |_| {
            let outcome = if cancelled.load(Ordering::Acquire) {
                Outcome::Cancelled
            } else {
                let result = evaluate(item);
                if result.is_err() && policy == FailurePolicy::FailFast {
                    cancelled.store(true, Ordering::Release);
                }
                Outcome::Evaluated(result)
            };
            // The receiver outlives the scope, so this cannot fail
            let _ = tx.send((index, outcome));
        });
    }
}

fn collect<A, R, E, C>(
    rx: Receiver<(usize, Outcome<R, E>)>,
    dispatched: usize,
    policy: FailurePolicy,
    identity: A,
    mut combine: C,
) -> Result<Reduction<A, E>, ItemError<E>>
where
    E: Display,
    C: FnMut(A, R) -> A,
{
    let mut aggregate = identity;
    let mut evaluated = 0;
    let mut skipped = Vec::new();
    let mut first_error = None;
    let mut cancelled = 0;
    let mut received = 0;

    for (index, outcome) in rx.iter().take(dispatched) {
        received += 1;
        match outcome {
            Outcome::Evaluated(Ok(value)) => {
                aggregate = combine(aggregate, value);
                evaluated += 1;
            }
            Outcome::Evaluated(Err(error)) => match policy {
                FailurePolicy::FailFast if first_error.is_none() => {
                    first_error = Some(ItemError { index, error });
                }
                FailurePolicy::FailFast => {
                    debug!(index, %error, "further failure after cancellation");
                }
                FailurePolicy::Skip => {
                    warn!(index, %error, "skipping work item");
                    skipped.push(ItemError { index, error });
                }
            },
            Outcome::Cancelled => cancelled += 1,
        }
    }

    debug_assert_eq!(received, dispatched);
    debug!(
        received,
        evaluated,
        skipped = skipped.len(),
        cancelled,
        "fan-out drained"
    );

    match first_error {
        Some(err) => Err(err),
        None => Ok(Reduction {
            aggregate,
            evaluated,
            skipped,
        }),
    }
}
