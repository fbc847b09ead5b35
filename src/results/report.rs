//! Run report construction and persistence
//!
//! The aggregate record of one invocation, written to a fixed-name summary
//! file inside the output directory.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Fixed name of the summary artifact inside the output directory
pub const SUMMARY_FILE: &str = "summary.txt";

/// Aggregate record of one run.
///
/// Built once after all results are collected and never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    /// Full invocation argv, recorded for audit
    pub argv: Vec<String>,

    /// Completion timestamp
    pub completed_at: DateTime<Utc>,

    /// Wall-clock time since dispatch began
    pub elapsed: Duration,

    /// Number of tests run
    pub total: usize,

    /// Failed test names, sorted lexicographically
    pub failures: Vec<String>,
}

impl RunReport {
    pub fn new(argv: Vec<String>, total: usize, failures: Vec<String>, elapsed: Duration) -> Self {
        Self {
            argv,
            completed_at: Utc::now(),
            elapsed,
            total,
            failures,
        }
    }

    /// Render the summary artifact: invocation argv, completion timestamp,
    /// elapsed duration, then the failed names one per line.
    pub fn summary_text(&self) -> String {
        format!(
            "# run {:?}\n# on {}, elapsed {:?}:\n{}",
            self.argv,
            self.completed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.elapsed,
            self.failures.join("\n")
        )
    }

    /// Persist the summary file. A write failure here is fatal to the run.
    pub fn write_summary(&self, outdir: &Path) -> Result<PathBuf> {
        let path = outdir.join(SUMMARY_FILE);
        std::fs::write(&path, self.summary_text())
            .with_context(|| format!("failed to write {}", path.display()))?;

        info!("Saved run summary to {}", path.display());
        Ok(path)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failures, elapsed {:?}",
            self.failures.len(),
            self.elapsed
        )
    }
}
