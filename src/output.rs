//! Batch summary output
//!
//! Renders the final SUCCEEDED/FAILED listing. Per-step detail stays in
//! the debug logs; the summary only carries each failure's one-line
//! description.

use crate::domain::BatchSummary;
use colored::Colorize;
use std::io::Write;

/// Writes the end-of-run summary
pub fn write_summary(summary: &BatchSummary, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Finished updating examples")?;

    for result in summary.successes() {
        writeln!(out, "  SUCCEEDED: {}", result.target.name.green())?;
    }

    for result in summary.failures() {
        writeln!(
            out,
            "  FAILED: {} ({})",
            result.target.name.red(),
            result.detail
        )?;
    }

    writeln!(
        out,
        "{} succeeded, {} failed",
        summary.success_count(),
        summary.failure_count()
    )
}
