//! Configuration resolution from CLI args and environment

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable consulted when `--inputs-dir` is not given
pub const INPUTS_DIR_ENV: &str = "AOC_INPUTS_DIR";
pub const DEFAULT_INPUTS_DIR: &str = "inputs";

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    pub year_filter: Option<u16>,
    pub day_filter: Option<u8>,
    pub part_filter: Option<u8>,
    pub tags: Vec<String>,
    pub inputs_dir: PathBuf,
    /// Single input file replacing the inputs directory lookup
    pub input_override: Option<PathBuf>,
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    pub quiet: bool,
    pub verbosity: u8,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        Self::resolve(args, std::env::var_os(INPUTS_DIR_ENV))
    }

    fn resolve(args: Args, env_inputs_dir: Option<OsString>) -> Result<Self, CliError> {
        let inputs_dir = args
            .inputs_dir
            .or_else(|| env_inputs_dir.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUTS_DIR));

        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".to_string())),
            Some(n) => n,
            None => num_cpus(),
        };

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            inputs_dir: expand_tilde(&inputs_dir),
            input_override: args.input.map(|p| expand_tilde(&p)),
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            verbosity: args.verbose,
        })
    }

    /// Default `tracing` filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Expand a leading `~` to the home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("aoc").chain(extra.iter().copied())).unwrap()
    }

    #[test]
    fn inputs_dir_prefers_flag_then_env_then_default() {
        let flag =
            Config::resolve(args(&["--inputs-dir", "puzzles"]), Some("env_dir".into())).unwrap();
        assert_eq!(flag.inputs_dir, PathBuf::from("puzzles"));

        let env = Config::resolve(args(&[]), Some("env_dir".into())).unwrap();
        assert_eq!(env.inputs_dir, PathBuf::from("env_dir"));

        let default = Config::resolve(args(&[]), None).unwrap();
        assert_eq!(default.inputs_dir, PathBuf::from(DEFAULT_INPUTS_DIR));
    }

    #[test]
    fn tilde_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde(Path::new("~/aoc")), home.join("aoc"));
        assert_eq!(expand_tilde(Path::new("~")), home);
        assert_eq!(expand_tilde(Path::new("rel/~")), PathBuf::from("rel/~"));
    }

    #[test]
    fn zero_threads_is_rejected() {
        assert!(matches!(
            Config::resolve(args(&["--threads", "0"]), None),
            Err(CliError::Config(_))
        ));
        let config = Config::resolve(args(&["--threads", "3"]), None).unwrap();
        assert_eq!(config.thread_count, 3);
    }

    #[test]
    fn verbosity_maps_to_log_level() {
        assert_eq!(Config::resolve(args(&[]), None).unwrap().log_level(), "warn");
        assert_eq!(Config::resolve(args(&["-vv"]), None).unwrap().log_level(), "debug");
        assert_eq!(Config::resolve(args(&["-vvvv"]), None).unwrap().log_level(), "trace");
    }
}
