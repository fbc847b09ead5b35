//! Test result models
//!
//! Defines outcomes, captured output, and per-test results.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single test execution
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    Pass,
    Fail(String),
}

impl TestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TestOutcome::Pass)
    }

    /// Failure cause text, if any
    pub fn cause(&self) -> Option<&str> {
        match self {
            TestOutcome::Pass => None,
            TestOutcome::Fail(cause) => Some(cause),
        }
    }

    /// Prefix applied to the derived summary line
    pub fn prefix(&self) -> &'static str {
        match self {
            TestOutcome::Pass => "ok: ",
            TestOutcome::Fail(_) => "error: ",
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestOutcome::Pass => write!(f, "success"),
            TestOutcome::Fail(cause) => write!(f, "{cause}"),
        }
    }
}

/// Complete output of a test process, stdout and stderr captured
/// independently and never interleaved.
#[derive(Clone, Debug, Default)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Result of a single test execution.
///
/// Exactly one is produced per submitted script, and it is immutable once
/// constructed.
#[derive(Clone, Debug)]
pub struct TestResult {
    pub name: String,
    pub outcome: TestOutcome,
    pub summary: String,
}

impl TestResult {
    /// Result for a cleanly exited test
    pub fn pass(name: impl Into<String>, output: &CapturedOutput) -> Self {
        let outcome = TestOutcome::Pass;
        let summary = format!("{}{}", outcome.prefix(), summary_body(&output.stdout));
        Self {
            name: name.into(),
            outcome,
            summary,
        }
    }

    /// Result for a test whose process did not exit cleanly
    pub fn fail(name: impl Into<String>, cause: impl Into<String>, output: &CapturedOutput) -> Self {
        let outcome = TestOutcome::Fail(cause.into());
        let summary = format!("{}{}", outcome.prefix(), summary_body(&output.stdout));
        Self {
            name: name.into(),
            outcome,
            summary,
        }
    }

    /// Result for a test whose log file could not be created; the process
    /// is never run in this case.
    pub fn create_error(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: TestOutcome::Fail("create error".to_string()),
            summary: "error: create error".to_string(),
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.summary)
    }
}

/// Derive the one-line summary body from captured stdout.
///
/// The stream is split on line-feed; a trailing newline does not count as a
/// line. With at least 3 lines the body is the 3rd-from-last line (index
/// `count - 3`), otherwise it is empty. Test scripts are expected to print
/// their own verdict two lines before the end of output, so this rule must
/// be preserved as-is.
pub fn summary_body(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last().map(|l| l.is_empty()).unwrap_or(false) {
        lines.pop();
    }
    if lines.len() >= 3 {
        lines[lines.len() - 3].to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(stdout: &str) -> CapturedOutput {
        CapturedOutput {
            stdout: stdout.as_bytes().to_vec(),
            stderr: Vec::new(),
        }
    }

    #[test]
    fn test_summary_body_three_lines() {
        assert_eq!(summary_body(b"a\nb\nc\n"), "a");
    }

    #[test]
    fn test_summary_body_no_trailing_newline() {
        assert_eq!(summary_body(b"w\nx\ny\nz"), "x");
    }

    #[test]
    fn test_summary_body_short_output() {
        assert_eq!(summary_body(b""), "");
        assert_eq!(summary_body(b"one\n"), "");
        assert_eq!(summary_body(b"one\ntwo\n"), "");
    }

    #[test]
    fn test_pass_summary_prefix() {
        let result = TestResult::pass("t1.sh", &output("a\nb\nc\n"));
        assert!(result.outcome.is_success());
        assert_eq!(result.summary, "ok: a");
    }

    #[test]
    fn test_fail_summary_prefix() {
        let result = TestResult::fail("t2.sh", "exit status: 1", &output("x\n"));
        assert!(!result.outcome.is_success());
        assert_eq!(result.outcome.cause(), Some("exit status: 1"));
        assert_eq!(result.summary, "error: ");
    }

    #[test]
    fn test_create_error_result() {
        let result = TestResult::create_error("t3.sh");
        assert_eq!(result.outcome, TestOutcome::Fail("create error".to_string()));
        assert_eq!(result.summary, "error: create error");
    }

    #[test]
    fn test_result_display() {
        let result = TestResult::pass("t1.sh", &output("a\nb\nc\n"));
        assert_eq!(result.to_string(), "t1.sh - ok: a");
    }
}
