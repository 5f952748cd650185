//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inputs listed before any solver runs
    #[error("Missing {} input file(s): {}", .0.len(), display_paths(.0))]
    MissingInputs(Vec<PathBuf>),

    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    #[error("{0}")]
    Executor(#[from] ArcExecutorError),

    /// Some parts failed; each failure has already been reported
    #[error("{failed} of {total} part(s) failed")]
    Failures { failed: usize, total: usize },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    #[error("Channel send error")]
    ChannelSend,

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    #[error("Executor thread panicked")]
    Panicked,

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening existing `Multiple`s
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = match first.inner() {
            ExecutorError::Multiple(existing) => existing.clone(),
            _ => vec![first.clone()],
        };
        match second.inner() {
            ExecutorError::Multiple(more) => errors.extend(more.iter().cloned()),
            _ => errors.push(second),
        }
        ExecutorError::Multiple(errors).into()
    }

    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}

/// Reading puzzle inputs
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(err: &ArcExecutorError) -> usize {
        match err.inner() {
            ExecutorError::Multiple(v) => v.len(),
            _ => 1,
        }
    }

    #[test]
    fn combine_flattens_nested_errors() {
        let a: ArcExecutorError = ExecutorError::ChannelSend.into();
        let b: ArcExecutorError = ExecutorError::Panicked.into();
        let ab = ArcExecutorError::combine(a.clone(), b.clone());
        assert_eq!(count(&ab), 2);

        let abab = ArcExecutorError::combine(ab.clone(), ab);
        assert_eq!(count(&abab), 4);

        let single = ArcExecutorError::combine_opt(None, a);
        assert_eq!(count(&single), 1);
        assert_eq!(abab.to_string(), "Multiple errors occurred (4 total)");
    }

    #[test]
    fn missing_inputs_lists_paths() {
        let err = CliError::MissingInputs(vec!["a/2024_day01.txt".into(), "b.txt".into()]);
        assert_eq!(
            err.to_string(),
            "Missing 2 input file(s): a/2024_day01.txt, b.txt"
        );
    }
}
