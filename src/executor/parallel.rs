//! Bounded-concurrency scheduling and aggregation
//!
//! Fans one task out per test script, caps parallel execution with a
//! semaphore, and collects results back onto a single reporting stream.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::executor::ScriptExecutor;
use crate::models::TestResult;
use crate::output::ProgressPrinter;
use crate::results::RunReport;
use crate::utils::Timer;

/// Scheduler for a bounded-concurrency test run
pub struct Scheduler {
    jobs: usize,
}

impl Scheduler {
    pub fn new(jobs: usize) -> Self {
        Self { jobs: jobs.max(1) }
    }

    /// Run every entry to completion and aggregate the results.
    ///
    /// Creates the output directory before any test starts (failure is
    /// fatal to the whole run), then spawns one task per entry. Each task
    /// acquires one semaphore permit before executing and releases it by
    /// drop on every exit path, so a failed test never leaks a worker slot.
    ///
    /// Results arrive in completion order over a channel sized to the entry
    /// count, so finished workers never block handing off. After exactly N
    /// results the failures list is sorted and the report built. There is
    /// no cancellation and no timeout: a hung script hangs the run.
    pub async fn run(&self, config: &RunConfig, entries: Vec<String>) -> Result<RunReport> {
        anyhow::ensure!(!entries.is_empty(), "no test scripts to run");

        std::fs::create_dir_all(&config.outdir).with_context(|| {
            format!(
                "failed to create output directory {}",
                config.outdir.display()
            )
        })?;

        let total = entries.len();
        let timer = Timer::start("test run");
        let semaphore = Arc::new(Semaphore::new(self.jobs));
        let executor = Arc::new(ScriptExecutor::new(&config.shell, &config.outdir));
        let (tx, mut rx) = mpsc::channel::<TestResult>(total);

        info!("Running {} tests ({} concurrent)", total, self.jobs);

        for name in entries {
            let semaphore = semaphore.clone();
            let executor = executor.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let _permit = semaphore.acquire().await.unwrap();

                debug!("Starting {}", name);
                let result = executor.execute(&name).await;

                // Capacity equals the entry count, so this never blocks a
                // finished worker on a slow consumer.
                let _ = tx.send(result).await;
            });
        }
        drop(tx);

        let mut printer = ProgressPrinter::new(total);
        let mut failures = Vec::new();

        for completed in 1..=total {
            let result = rx
                .recv()
                .await
                .context("result channel closed before all tests completed")?;

            printer.update(completed, &result);
            if !result.outcome.is_success() {
                failures.push(result.name);
            }
        }
        printer.finish();

        failures.sort();
        Ok(RunReport::new(
            config.argv.clone(),
            total,
            failures,
            timer.stop(),
        ))
    }
}
