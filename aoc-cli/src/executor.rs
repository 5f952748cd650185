//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use tracing::{debug, info, warn};

/// Result from a single part
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// Set on the first result of each parsed instance
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// A registered solver selected by the filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    context: RunContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker needs, shared by reference across the pool
struct RunContext {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .thread_name(|i| format!("aoc-worker-{i}"))
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: RunContext {
                registry,
                inputs: InputStore::new(config.inputs_dir.clone(), config.input_override.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Work items matching the filters, in (year, day) order
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let ctx = &self.context;
        ctx.registry
            .storage()
            .iter_info()
            .filter(|info| ctx.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| ctx.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(ctx.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Input files the work items need but the store does not have
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<PathBuf> {
        work_items
            .iter()
            .filter(|w| !self.context.inputs.contains(w.year, w.day))
            .map(|w| self.context.inputs.path(w.year, w.day))
            .dedup()
            .collect()
    }

    /// Run every work item, sending one result per part to `tx`
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let ctx = &self.context;
        info!(
            solvers = work_items.len(),
            threads = self.thread_pool.current_num_threads(),
            mode = ?ctx.parallelize_by,
            "starting run"
        );

        match ctx.parallelize_by {
            ParallelizeBy::Sequential => run_in_order(&work_items, &tx, ctx),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .par_iter()
                        .filter_map(|items| run_in_order(items, &tx, ctx).err())
                        .reduce_with(ArcExecutorError::combine)
                        .map_or(Ok(()), Err)
                })
            }
            // Part mode also splits inside each work item, see `run_work`
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .filter_map(|work| run_work(work, &tx, ctx).err())
                    .reduce_with(ArcExecutorError::combine)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn run_in_order(
    items: &[WorkItem],
    tx: &Sender<SolverResult>,
    ctx: &RunContext,
) -> Result<(), ArcExecutorError> {
    let mut collected: Option<ArcExecutorError> = None;
    for work in items {
        if let Err(e) = run_work(work, tx, ctx) {
            collected = Some(ArcExecutorError::combine_opt(collected, e));
        }
    }
    collected.map_or(Ok(()), Err)
}

fn run_work(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    ctx: &RunContext,
) -> Result<(), ArcExecutorError> {
    let input = match ctx.inputs.read(work.year, work.day) {
        Ok(input) => input,
        Err(e) => {
            warn!(year = work.year, day = work.day, error = %e, "input unavailable");
            let message = e.to_string();
            for part in work.parts.clone() {
                let error = ParseError::Other(message.clone()).into();
                send(tx, failed_result(work.year, work.day, part, error))?;
            }
            return Ok(());
        }
    };

    if matches!(ctx.parallelize_by, ParallelizeBy::Part) {
        run_parts_parallel(work, &input, tx, &ctx.registry)
    } else {
        run_parts_sequential(work, &input, tx, &ctx.registry)
    }
}

/// Parse once and solve the parts in order on the shared data
fn run_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let mut solver = match registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => return send_creation_failure(work, e, tx),
    };

    debug!(year, day, parse = %solver.parse_duration(), "parsed input");
    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        send(tx, solve_part(year, day, part, &mut *solver, parse_duration.take()))?;
    }
    Ok(())
}

/// One task per part, each with its own parsed instance
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    work.parts
        .clone()
        .into_par_iter()
        .try_for_each(|part| {
            let result = match registry.create_solver(year, day, input) {
                Ok(mut solver) => {
                    let parse_duration = Some(solver.parse_duration());
                    solve_part(year, day, part, &mut *solver, parse_duration)
                }
                Err(e) => failed_result(year, day, part, e),
            };
            send(tx, result)
        })
}

/// A factory failure fails every selected part with the same message
fn send_creation_failure(
    work: &WorkItem,
    error: SolverError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    warn!(year = work.year, day = work.day, %error, "could not create solver");
    let message = error.to_string();
    let mut first = Some(error);
    for part in work.parts.clone() {
        let error = first
            .take()
            .unwrap_or_else(|| ParseError::Other(message.clone()).into());
        send(tx, failed_result(work.year, work.day, part, error))?;
    }
    Ok(())
}

fn solve_part(
    year: u16,
    day: u8,
    part: u8,
    solver: &mut dyn DynSolver,
    parse_duration: Option<TimeDelta>,
) -> SolverResult {
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            parse_duration,
            ..failed_result(year, day, part, e.into())
        },
    }
}

fn failed_result(year: u16, day: u8, part: u8, error: SolverError) -> SolverResult {
    SolverResult {
        year,
        day,
        part,
        answer: Err(error),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}
