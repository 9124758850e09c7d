//! Output reporters for audit results
//!
//! Supports two artifact formats:
//! - `markdown` - GitHub-flavored Markdown report
//! - `json` - Machine-readable JSON
//!
//! Reporters consume the immutable report read-only; the engine never
//! depends on them.

mod json;
mod markdown;

use crate::error::Result;
use crate::models::ArchitectureReport;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format '{s}'. Valid formats: markdown, json"
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a report in the given format.
pub fn render(report: &ArchitectureReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(markdown::render(report)),
        OutputFormat::Json => json::render(report),
    }
}

/// Recommended file extension for a format.
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Markdown => "md",
        OutputFormat::Json => "json",
    }
}
