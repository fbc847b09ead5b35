//! Data models for test execution
//!
//! This module contains the data structures shared across the application.

mod test_result;

pub use test_result::{summary_body, CapturedOutput, TestOutcome, TestResult};
