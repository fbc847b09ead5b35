//! Output rendering module
//!
//! Live progress output for the run in flight.

mod progress;

pub use progress::{format_progress, ProgressPrinter};
