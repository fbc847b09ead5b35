//! Results reporting module
//!
//! Aggregate run report and its on-disk summary artifact.

mod report;

pub use report::{RunReport, SUMMARY_FILE};
