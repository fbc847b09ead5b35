//! Single-test execution
//!
//! Runs one test script to completion, captures its output into a log file,
//! and folds every failure mode into the returned result.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::models::{CapturedOutput, TestResult};

/// Per-test failure causes
#[derive(Error, Debug)]
pub enum ExecError {
    /// The per-test log file could not be created
    #[error("create error")]
    CreateLog(#[source] std::io::Error),

    /// The interpreter process could not be spawned
    #[error("spawn failed: {0}")]
    Spawn(std::io::Error),

    /// The process ran but did not exit cleanly (non-zero exit or signal)
    #[error("{0}")]
    Exited(std::process::ExitStatus),
}

/// Executes a single test script and produces its result.
///
/// Never returns an error past its boundary: infrastructure and execution
/// failures alike are captured into the result's outcome.
pub struct ScriptExecutor {
    shell: String,
    outdir: PathBuf,
}

impl ScriptExecutor {
    pub fn new(shell: impl Into<String>, outdir: impl Into<PathBuf>) -> Self {
        Self {
            shell: shell.into(),
            outdir: outdir.into(),
        }
    }

    /// Log destination for a given test name.
    ///
    /// The name is joined lexically: a rooted identifier has its root
    /// stripped first, so the log always lands inside the output directory.
    /// Intermediate path components are kept as-is and are not created, so
    /// a nested name whose parent is missing surfaces as a create error.
    pub fn log_path(&self, name: &str) -> PathBuf {
        let file = format!("{name}.log");
        let relative: PathBuf = Path::new(&file)
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        self.outdir.join(relative)
    }

    /// Run one test to completion.
    ///
    /// Creates or overwrites `<outdir>/<name>.log`. If the log file cannot
    /// be created the process is never run and the result carries the fixed
    /// `create error` cause. Otherwise the script runs through the
    /// configured interpreter with stdout and stderr captured in full, the
    /// log is written, and the outcome classifies the exit.
    pub async fn execute(&self, name: &str) -> TestResult {
        let log_path = self.log_path(name);
        let mut log = match File::create(&log_path).await {
            Ok(file) => file,
            Err(e) => {
                debug!("{}: {}", log_path.display(), ExecError::CreateLog(e));
                return TestResult::create_error(name);
            }
        };

        debug!("Running {} {}", self.shell, name);
        let (status, output) = self.run_script(name).await;

        // Best effort: a partially written log must not turn into a second
        // failure for the same test.
        if let Err(e) = write_log(&mut log, &status, &output).await {
            warn!("Failed to write {}: {}", log_path.display(), e);
        }

        match status {
            Ok(()) => TestResult::pass(name, &output),
            Err(cause) => TestResult::fail(name, cause.to_string(), &output),
        }
    }

    async fn run_script(&self, name: &str) -> (Result<(), ExecError>, CapturedOutput) {
        let output = match Command::new(&self.shell).arg(name).output().await {
            Ok(output) => output,
            Err(e) => return (Err(ExecError::Spawn(e)), CapturedOutput::default()),
        };

        let captured = CapturedOutput {
            stdout: output.stdout,
            stderr: output.stderr,
        };

        if output.status.success() {
            (Ok(()), captured)
        } else {
            (Err(ExecError::Exited(output.status)), captured)
        }
    }
}

/// Write the structured log: exit-status header, then the full stdout and
/// stderr streams, delimited by section markers.
async fn write_log(
    log: &mut File,
    status: &Result<(), ExecError>,
    output: &CapturedOutput,
) -> std::io::Result<()> {
    let header = match status {
        Ok(()) => "success".to_string(),
        Err(cause) => cause.to_string(),
    };

    log.write_all(format!("*** EXIT: {header} ***\n\n").as_bytes())
        .await?;
    log.write_all(b"*** STDOUT: ***\n\n").await?;
    log.write_all(&output.stdout).await?;
    log.write_all(b"\n\n*** STDERR: ***\n\n").await?;
    log.write_all(&output.stderr).await?;
    log.flush().await?;
    Ok(())
}
