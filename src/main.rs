//! partest - run shell test scripts in parallel
//!
//! Expands the given glob patterns, runs every matching script through the
//! configured interpreter with a bounded number of workers, writes one log
//! file per script plus a run summary, and reports the aggregate failure
//! count and elapsed time.
//!
//! ## Usage
//!
//! ```bash
//! # Run t0*.sh with one worker per CPU, logs in results/
//! partest --outdir results 't0*.sh'
//!
//! # Two suites, eight workers
//! partest -j 8 -o results 'unit/*.sh' 'integration/*.sh'
//! ```
//!
//! A run with failing tests still exits 0; only configuration errors and a
//! failure to persist the summary are fatal.

use anyhow::Result;
use clap::Parser;
use tracing::info;

mod cli;
mod config;
mod executor;
mod models;
mod output;
mod results;
mod utils;

use cli::Args;
use config::RunConfig;
use executor::Scheduler;

#[tokio::main]
async fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let args = Args::parse();

    utils::init_logger(args.verbose);

    let config = RunConfig::from_args(&args, argv)?;

    let entries = cli::expand_patterns(&config.patterns)?;
    anyhow::ensure!(
        !entries.is_empty(),
        "no test scripts matched {:?}",
        config.patterns
    );

    info!("Matched {} test scripts", entries.len());

    let report = Scheduler::new(config.jobs).run(&config, entries).await?;
    report.write_summary(&config.outdir)?;

    println!("{report}");
    Ok(())
}
