//! Live progress rendering
//!
//! Emits a single overwritable progress line per completed test.

use std::io::{self, Write};

use crate::models::TestResult;

/// Format one progress update. The carriage return rewinds to the start of
/// the line so the next update overwrites this one; the padded columns erase
/// leftovers from longer previous lines.
pub fn format_progress(completed: usize, total: usize, name: &str, summary: &str) -> String {
    format!("\r{completed}/{total}: {name:<20} - {summary:<60} ")
}

/// Writes progress updates to stdout.
///
/// Failed tests get a trailing line break so the next update does not
/// overwrite them.
pub struct ProgressPrinter {
    total: usize,
}

impl ProgressPrinter {
    pub fn new(total: usize) -> Self {
        Self { total }
    }

    pub fn update(&mut self, completed: usize, result: &TestResult) {
        print!(
            "{}",
            format_progress(completed, self.total, &result.name, &result.summary)
        );
        if !result.outcome.is_success() {
            println!();
        }
        let _ = io::stdout().flush();
    }

    /// Terminate the progress line once all results are in
    pub fn finish(&self) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_starts_with_carriage_return() {
        let line = format_progress(1, 3, "t1.sh", "ok: a");
        assert!(line.starts_with("\r1/3: "));
        assert!(line.contains("t1.sh"));
        assert!(line.contains("ok: a"));
    }

    #[test]
    fn test_format_pads_columns() {
        let line = format_progress(10, 10, "t.sh", "ok: ");
        // Name and summary columns are fixed-width so shorter lines fully
        // overwrite longer ones.
        assert!(line.len() >= "\r10/10: ".len() + 20 + 3 + 60);
    }
}
