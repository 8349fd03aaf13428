//! Check report formatters.

use clap::ValueEnum;
use comfy_table::{Cell, Table};

use crate::checks::{CheckResult, Mode};

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `PASS - name :: details` line per check
    Text,
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Trait for formatting a check report.
pub trait Formatter: Send + Sync {
    /// Format the results of one run.
    fn format_report(&self, mode: Mode, results: &[CheckResult]) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Number of passing checks.
pub fn passed(results: &[CheckResult]) -> usize {
    results.iter().filter(|r| r.ok).count()
}

fn verdict(result: &CheckResult) -> &'static str {
    if result.ok {
        "PASS"
    } else {
        "FAIL"
    }
}

fn summary(results: &[CheckResult]) -> String {
    format!("Summary: {}/{} PASS", passed(results), results.len())
}

/// Plain line-per-check formatter.
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_report(&self, _mode: Mode, results: &[CheckResult]) -> String {
        let mut output = String::new();

        for result in results {
            output.push_str(verdict(result));
            output.push_str(" - ");
            output.push_str(&result.name);
            if !result.details.is_empty() {
                output.push_str(" :: ");
                output.push_str(&result.details);
            }
            output.push('\n');
        }

        output.push('\n');
        output.push_str(&summary(results));
        output
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_report(&self, mode: Mode, results: &[CheckResult]) -> String {
        let mut table = Table::new();
        table.set_header(vec!["Result", "Check", "Details"]);

        for result in results {
            table.add_row(vec![
                Cell::new(verdict(result)),
                Cell::new(&result.name),
                Cell::new(&result.details),
            ]);
        }

        format!("{}\n{} ({} mode)", table, summary(results), mode)
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_report(&self, mode: Mode, results: &[CheckResult]) -> String {
        let report = serde_json::json!({
            "mode": mode.to_string(),
            "passed": passed(results),
            "total": results.len(),
            "results": results,
        });
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }
}
