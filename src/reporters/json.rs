//! JSON reporter

use crate::error::Result;
use crate::models::ArchitectureReport;

/// Render the report as pretty-printed JSON.
pub fn render(report: &ArchitectureReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
