//! Markdown reporter
//!
//! Renders the architecture report as GitHub-flavored Markdown, suitable
//! for README files, pull request comments, and wikis.

use crate::models::{ArchitectureReport, Priority, Recommendation, SubsystemAnalysis};
use std::fmt::Write;

/// Render the report as Markdown.
pub fn render(report: &ArchitectureReport) -> String {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');
    md.push_str(&render_global_metrics(report));
    md.push('\n');
    for analysis in [&report.mobile, &report.server, &report.dashboard] {
        md.push_str(&render_subsystem(analysis));
        md.push('\n');
    }
    md.push_str(&render_recommendations(report));

    md
}

fn assessment(score: f64) -> &'static str {
    if score >= 80.0 {
        "Excellent"
    } else if score >= 60.0 {
        "Good"
    } else if score >= 40.0 {
        "Fair"
    } else {
        "Needs improvement"
    }
}

fn render_header(report: &ArchitectureReport) -> String {
    format!(
        "# Architecture Audit Report\n\n\
         **Date**: {}  \n\
         **Schema**: {}  \n\
         **Quality Score**: {:.1}/100 - {}\n",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        report.schema_version,
        report.quality_score,
        assessment(report.quality_score)
    )
}

fn render_global_metrics(report: &ArchitectureReport) -> String {
    format!(
        "## Summary\n\n\
         | Metric | Value |\n\
         |--------|-------|\n\
         | Mobile files | {} |\n\
         | Backend files | {} |\n\
         | Dashboard files | {} |\n\
         | Recommendations | {} |\n",
        report.metrics.total_mobile_files,
        report.metrics.total_server_files,
        report.metrics.total_dashboard_files,
        report.metrics.total_recommendations
    )
}

fn render_subsystem(analysis: &SubsystemAnalysis) -> String {
    let mut section = format!("## {} Analysis\n\n### Structure\n", analysis.subsystem);

    for (role, count) in &analysis.metrics {
        let _ = writeln!(section, "- **{role}**: {count}");
    }
    if analysis.metrics.is_empty() {
        section.push_str("No roles configured.\n");
    }

    section.push_str("\n### Detected Patterns\n");
    for (pattern, detected) in &analysis.patterns.patterns {
        let _ = writeln!(
            section,
            "- **{pattern}**: {}",
            if *detected { "yes" } else { "no" }
        );
    }

    if let Some(posture) = &analysis.security {
        section.push_str("\n### Security Controls\n");
        for (control, enabled) in posture.as_table() {
            let _ = writeln!(
                section,
                "- **{control}**: {}",
                if enabled { "yes" } else { "no" }
            );
        }
    }

    section.push_str("\n### Code Quality\n");
    let quality = &analysis.quality;
    let _ = writeln!(section, "- **Files**: {}", quality.total_files);
    let _ = writeln!(
        section,
        "- **Lines (sampled)**: {} over {} files",
        quality.lines_sampled, quality.files_sampled
    );
    let _ = writeln!(
        section,
        "- **Documentation**: {:.1}%",
        quality.documentation_coverage
    );
    if let Some(adequate) = quality.error_handling {
        let _ = writeln!(
            section,
            "- **Error handling**: {}",
            if adequate { "yes" } else { "no" }
        );
    }

    if analysis.dependencies.total > 0 {
        let _ = writeln!(
            section,
            "\n### Dependencies\n- **Production**: {}\n- **Development**: {}",
            analysis.dependencies.production.len(),
            analysis.dependencies.development.len()
        );
    }

    section
}

fn render_recommendations(report: &ArchitectureReport) -> String {
    let mut section = String::from("## Recommendations\n");

    let groups = [
        (Priority::High, "High Priority"),
        (Priority::Medium, "Medium Priority"),
        (Priority::Low, "Low Priority"),
    ];

    for (priority, heading) in groups {
        let items = report.by_priority(priority);
        if items.is_empty() {
            continue;
        }
        let _ = write!(section, "\n### {heading}\n\n");
        for item in items {
            section.push_str(&render_recommendation(item));
        }
    }

    if report.recommendations.is_empty() {
        section.push_str("\nNo recommendations.\n");
    }

    section
}

fn render_recommendation(rec: &Recommendation) -> String {
    format!(
        "- **[{}]** {}\n  - {}\n  - Impact: {}\n",
        rec.category, rec.title, rec.description, rec.impact
    )
}
