//! CLI command definition and handler

use crate::auditor::ArchitectureAuditor;
use crate::models::Priority;
use crate::reporters::{self, OutputFormat};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

/// Archaudit - architecture audit for multi-subsystem products
#[derive(Parser, Debug)]
#[command(name = "archaudit")]
#[command(
    version,
    about = "Audit a mobile/backend/dashboard product tree and produce an architecture report",
    long_about = "Archaudit inventories each subsystem's components, detects architectural \
patterns and security controls with lexical heuristics, samples code quality, and emits a \
prioritized list of recommendations with an aggregate 0-100 quality score.\n\n\
The audit is read-only and always produces a report: missing subsystems degrade to empty \
sections instead of failing the run.",
    after_help = "\
Examples:
  archaudit .                          Audit the current directory
  archaudit /path/to/product           Audit a specific tree
  archaudit . --format json            JSON report for scripting
  archaudit . -o docs/architecture.md  Write the report to a fixed path"
)]
pub struct Cli {
    /// Path to the project root (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format: markdown (or md), json
    #[arg(long, short = 'f', default_value = "markdown", value_parser = ["markdown", "md", "json"])]
    pub format: String,

    /// Output file path (default: auto-named in the project root)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Run the audit and write the report artifact.
pub fn run(cli: Cli) -> Result<()> {
    let format = cli.format.parse::<OutputFormat>().map_err(|err| anyhow!(err))?;

    let report = ArchitectureAuditor::new(&cli.path).audit();
    let rendered = reporters::render(&report, format)?;

    let output_path = cli.output.unwrap_or_else(|| {
        cli.path.join(format!(
            "ARCHITECTURE_AUDIT_{}.{}",
            report.timestamp.format("%Y%m%d_%H%M%S"),
            reporters::file_extension(format)
        ))
    });
    std::fs::write(&output_path, rendered)
        .with_context(|| format!("writing report to {}", output_path.display()))?;

    print_summary(&report, &output_path);
    Ok(())
}

fn print_summary(report: &crate::models::ArchitectureReport, output_path: &std::path::Path) {
    println!("{}", style("Architecture audit complete").bold());
    println!("Report: {}", output_path.display());
    println!(
        "Quality score: {}",
        style(format!("{:.1}/100", report.quality_score)).cyan().bold()
    );
    println!("Recommendations: {}", report.recommendations.len());

    let high = report.by_priority(Priority::High);
    if !high.is_empty() {
        println!();
        println!("{}", style(format!("High priority ({})", high.len())).red().bold());
        for rec in high.iter().take(5) {
            println!("  - [{}] {}", rec.category, rec.title);
        }
    }
}
