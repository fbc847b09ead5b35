//! Test execution engine
//!
//! Single-script execution and the bounded-concurrency scheduler.

mod parallel;
mod script;

pub use parallel::Scheduler;
pub use script::{ExecError, ScriptExecutor};
