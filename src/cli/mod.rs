//! CLI argument parsing
//!
//! Defines the command-line interface using clap and expands the script
//! glob patterns.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Parallel shell test runner
#[derive(Parser, Debug)]
#[command(name = "partest")]
#[command(version)]
#[command(about = "Run shell test scripts in parallel, one log file per test")]
#[command(long_about = None)]
pub struct Args {
    /// Number of tests to run concurrently [default: CPU count]
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Directory for per-test logs and the run summary
    #[arg(short, long)]
    pub outdir: PathBuf,

    /// Interpreter used to run each script [default: /bin/sh]
    #[arg(long)]
    pub shell: Option<String>,

    /// Defaults file (JSON or YAML) for jobs and shell
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Glob patterns naming the test scripts to run
    #[arg(required = true)]
    pub patterns: Vec<String>,
}

/// Expand glob patterns against the filesystem.
///
/// Matches are concatenated in pattern order and deliberately not
/// deduplicated: a script matched by two patterns runs twice.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<String>> {
    let mut entries = Vec::new();

    for pattern in patterns {
        let matches =
            glob::glob(pattern).with_context(|| format!("invalid glob pattern {pattern:?}"))?;

        for path in matches {
            let path = path.with_context(|| format!("failed to expand pattern {pattern:?}"))?;
            entries.push(path.to_string_lossy().into_owned());
        }
    }

    Ok(entries)
}
