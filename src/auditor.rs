//! Audit orchestration
//!
//! The auditor owns the lifecycle of one run: it fans the three subsystem
//! analyses out in parallel, feeds the snapshots to the scorer and the
//! recommendation engine, and assembles the immutable report. Each run is
//! a pure function of the project root's current contents; nothing is
//! shared between runs.

use crate::analyzer::SubsystemAnalyzer;
use crate::config::SubsystemProfile;
use crate::models::{ArchitectureReport, GlobalMetrics};
use crate::recommend::RecommendationEngine;
use crate::scoring::QualityScorer;
use chrono::Utc;
use std::path::PathBuf;
use tracing::info;

/// Report schema version.
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Sequences the full audit for one project root.
#[derive(Debug)]
pub struct ArchitectureAuditor {
    project_root: PathBuf,
    mobile: SubsystemAnalyzer,
    server: SubsystemAnalyzer,
    dashboard: SubsystemAnalyzer,
    recommendations: RecommendationEngine,
    scorer: QualityScorer,
}

impl ArchitectureAuditor {
    /// Auditor with the stock subsystem profiles.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::with_profiles(
            project_root,
            SubsystemProfile::mobile(),
            SubsystemProfile::server(),
            SubsystemProfile::dashboard(),
        )
    }

    /// Auditor with custom profiles (different roots or taxonomies).
    pub fn with_profiles(
        project_root: impl Into<PathBuf>,
        mobile: SubsystemProfile,
        server: SubsystemProfile,
        dashboard: SubsystemProfile,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            mobile: SubsystemAnalyzer::new(mobile),
            server: SubsystemAnalyzer::new(server),
            dashboard: SubsystemAnalyzer::new(dashboard),
            recommendations: RecommendationEngine::new(),
            scorer: QualityScorer::new(),
        }
    }

    /// Run the audit and assemble the report.
    ///
    /// The three analyses are independent; the fan-out is an optimization
    /// only and correctness does not depend on it.
    pub fn audit(&self) -> ArchitectureReport {
        info!("auditing {}", self.project_root.display());

        let (mobile, (server, dashboard)) = rayon::join(
            || self.mobile.analyze(&self.project_root),
            || {
                rayon::join(
                    || self.server.analyze(&self.project_root),
                    || self.dashboard.analyze(&self.project_root),
                )
            },
        );

        let recommendations =
            self.recommendations
                .evaluate(&self.project_root, &mobile, &server, &dashboard);
        let quality_score = self.scorer.score(&mobile, &server, &dashboard);

        let metrics = GlobalMetrics {
            total_mobile_files: mobile.quality.total_files,
            total_server_files: server.quality.total_files,
            total_dashboard_files: dashboard.quality.total_files,
            total_recommendations: recommendations.len(),
        };

        info!(
            "audit complete: score {quality_score:.1}, {} recommendations",
            recommendations.len()
        );

        ArchitectureReport {
            timestamp: Utc::now(),
            schema_version: SCHEMA_VERSION.to_string(),
            mobile,
            server,
            dashboard,
            recommendations,
            metrics,
            quality_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_root_still_produces_a_well_formed_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let report = ArchitectureAuditor::new(dir.path()).audit();

        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.quality_score, 0.0);
        assert_eq!(report.metrics.total_mobile_files, 0);
        assert_eq!(
            report.metrics.total_recommendations,
            report.recommendations.len()
        );
        assert!(report
            .recommendations
            .iter()
            .any(|rec| rec.title == "Implémenter le monitoring"));
    }
}
