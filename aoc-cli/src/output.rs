//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::Instant;

/// Prints results as they become ready, then a summary
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

/// Totals over a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub failed: usize,
    pub parse_time: TimeDelta,
    pub solve_time: TimeDelta,
}

impl Summary {
    pub fn of(results: &[SolverResult]) -> Self {
        let solved = results.iter().filter(|r| r.answer.is_ok()).count();
        Self {
            solved,
            failed: results.len() - solved,
            parse_time: results.iter().filter_map(|r| r.parse_duration).sum(),
            solve_time: results.iter().map(|r| r.solve_duration).sum(),
        }
    }
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Answers go to stdout, failures to stderr
    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{answer}"),
            (Ok(_), false) => println!("{}", format_result(result)),
            (Err(e), true) => eprintln!("Error: {e}"),
            (Err(_), false) => eprintln!("{}", format_result(result)),
        }
    }

    /// Sum of parse and solve times next to the wall-clock time
    pub fn print_summary(&self, summary: &Summary) {
        if self.quiet {
            return;
        }

        let elapsed = self.start_time.elapsed();
        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", summary.solved, summary.failed);
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!("Elapsed wall-clock time: {}", format_std_duration(elapsed));
        if !elapsed.is_zero() {
            let compute = summary.parse_time + summary.solve_time;
            let compute_secs = compute.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            println!("Speedup factor: {:.2}x", compute_secs / elapsed.as_secs_f64());
        }
    }
}

/// `YYYY/DD Part P: answer (parse: .., solve: ..)` or the failure message
pub fn format_result(result: &SolverResult) -> String {
    let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
    match &result.answer {
        Ok(answer) => {
            let parse_timing = result
                .parse_duration
                .map(|d| format!("parse: {}, ", format_duration(d)))
                .unwrap_or_default();
            format!(
                "{prefix}: {answer} ({parse_timing}solve: {})",
                format_duration(result.solve_duration)
            )
        }
        Err(e) => format!("{prefix}: Error - {e}"),
    }
}

fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }
    format_micros(micros as u128)
}

fn format_std_duration(d: std::time::Duration) -> String {
    format_micros(d.as_micros())
}

fn format_micros(micros: u128) -> String {
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{SolveError, SolverError};

    fn result(answer: Result<String, SolverError>, parse_ms: Option<i64>) -> SolverResult {
        SolverResult {
            year: 2024,
            day: 3,
            part: 2,
            answer,
            parse_duration: parse_ms.map(TimeDelta::milliseconds),
            solve_duration: TimeDelta::microseconds(250),
        }
    }

    #[test]
    fn answer_line_includes_timings() {
        let line = format_result(&result(Ok("48".into()), Some(2)));
        assert_eq!(line, "2024/03 Part 2: 48 (parse: 2.00ms, solve: 250µs)");

        let line = format_result(&result(Ok("48".into()), None));
        assert_eq!(line, "2024/03 Part 2: 48 (solve: 250µs)");
    }

    #[test]
    fn failure_line_carries_the_message() {
        let err = SolverError::SolveError(SolveError::PartOutOfRange(3));
        let line = format_result(&result(Err(err), None));
        assert_eq!(line, "2024/03 Part 2: Error - Solve error: Part 3 is out of range");
    }

    #[test]
    fn durations_pick_a_readable_unit() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-20)), "-20µs");
    }

    #[test]
    fn summary_counts_failures_and_sums_time() {
        let results = vec![
            result(Ok("1".into()), Some(3)),
            result(Ok("2".into()), None),
            result(Err(SolveError::PartNotImplemented(2).into()), None),
        ];
        let summary = Summary::of(&results);
        assert_eq!(summary.solved, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.parse_time, TimeDelta::milliseconds(3));
        assert_eq!(summary.solve_time, TimeDelta::microseconds(750));
    }
}
