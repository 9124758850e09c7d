//! Quality scoring
//!
//! Aggregates documentation coverage and backend security-control coverage
//! into a single 0-100 score.
//!
//! # Scoring Formula
//!
//! ```text
//! Score = mobile_doc + backend_doc + backend_security + dashboard_doc
//!
//! Where each category contributes up to 25 points:
//!   doc category      = min(coverage% × 0.25, 25)
//!   security category = satisfied_controls / total_controls × 25
//! ```
//!
//! Partial credit: a category only counts toward the achievable maximum
//! when it produced a non-zero signal, so a project with a single
//! measurable subsystem is neither penalized nor rewarded for subsystems
//! that could not be measured at all. If no category produced signal the
//! score is 0.0.

use crate::models::{SecurityPosture, SubsystemAnalysis};

/// Points available per category.
const CATEGORY_WEIGHT: f64 = 25.0;

/// Computes the aggregate 0-100 quality score.
#[derive(Debug, Default, Clone)]
pub struct QualityScorer;

impl QualityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score the three subsystem snapshots.
    pub fn score(
        &self,
        mobile: &SubsystemAnalysis,
        server: &SubsystemAnalysis,
        dashboard: &SubsystemAnalysis,
    ) -> f64 {
        let mut score = 0.0;
        let mut measured = false;

        for coverage in [
            mobile.quality.documentation_coverage,
            server.quality.documentation_coverage,
            dashboard.quality.documentation_coverage,
        ] {
            if coverage > 0.0 {
                score += (coverage / 100.0 * CATEGORY_WEIGHT).min(CATEGORY_WEIGHT);
                measured = true;
            }
        }

        let posture = server.security.unwrap_or_default();
        let satisfied = posture.satisfied();
        if satisfied > 0 {
            score += satisfied as f64 / SecurityPosture::CONTROL_COUNT as f64 * CATEGORY_WEIGHT;
            measured = true;
        }

        if measured {
            score
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubsystemAnalysis;

    fn with_coverage(coverage: f64) -> SubsystemAnalysis {
        SubsystemAnalysis {
            quality: crate::models::QualitySnapshot {
                documentation_coverage: coverage,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn unmeasured_project_scores_zero() {
        let empty = SubsystemAnalysis::default();
        let score = QualityScorer::new().score(&empty, &empty, &empty);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn two_of_six_controls_contribute_a_sixth_of_the_weight() {
        let server = SubsystemAnalysis {
            security: Some(SecurityPosture {
                jwt: true,
                bcrypt: true,
                ..Default::default()
            }),
            ..Default::default()
        };
        let empty = SubsystemAnalysis::default();

        let score = QualityScorer::new().score(&empty, &server, &empty);
        assert!((score - 2.0 / 6.0 * 25.0).abs() < 1e-9);
    }

    #[test]
    fn coverage_contribution_is_capped() {
        let mobile = with_coverage(100.0);
        let empty = SubsystemAnalysis::default();
        let score = QualityScorer::new().score(&mobile, &empty, &empty);
        assert_eq!(score, 25.0);
    }

    #[test]
    fn score_is_monotonic_in_a_single_category() {
        let empty = SubsystemAnalysis::default();
        let scorer = QualityScorer::new();

        let low = scorer.score(&with_coverage(40.0), &empty, &empty);
        let high = scorer.score(&with_coverage(80.0), &empty, &empty);
        assert!(high > low);
    }

    #[test]
    fn zero_coverage_category_does_not_add_weight() {
        // One measured category at full marks scores 25, not 25 out of 100.
        let mobile = with_coverage(100.0);
        let empty = SubsystemAnalysis::default();
        let score = QualityScorer::new().score(&mobile, &empty, &empty);
        assert_eq!(score, 25.0);
    }
}
