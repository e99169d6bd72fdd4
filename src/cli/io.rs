//! Console output for CLI commands
//!
//! Everything writes to a caller-supplied writer so commands can be tested
//! against a buffer.

use std::io::Write;

use super::errors::CliResult;
use crate::spec::ValidationReport;

/// Width of the `=` rules around banners
pub const RULE_WIDTH: usize = 60;

/// Writes a blank line, then `title` between two rules.
pub fn write_banner<W: Write>(out: &mut W, title: &str) -> CliResult<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{}", rule)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule)?;
    Ok(())
}

/// Writes `heading` followed by one `  - item` line per item. Writes nothing
/// when `items` is empty.
pub fn write_bullets<W: Write>(out: &mut W, heading: &str, items: &[String]) -> CliResult<()> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out, "\n{}", heading)?;
    for item in items {
        writeln!(out, "  - {}", item)?;
    }
    Ok(())
}

/// Writes a report's warnings, then its errors under `error_heading`.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ValidationReport,
    error_heading: &str,
) -> CliResult<()> {
    write_bullets(out, "WARNING - Warnings:", &report.warning_messages())?;
    write_bullets(out, error_heading, &report.error_messages())?;
    Ok(())
}

/// Writes the batch summary printed after validating several files.
pub fn write_summary<W: Write>(
    out: &mut W,
    total: usize,
    passed: usize,
    failed: usize,
) -> CliResult<()> {
    write_banner(out, "SUMMARY")?;
    writeln!(out, "Total files: {}", total)?;
    writeln!(out, "Passed: {}", passed)?;
    writeln!(out, "Failed: {}", failed)?;
    Ok(())
}
