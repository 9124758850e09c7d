//! Quality metric aggregation
//!
//! Builds a [`QualitySnapshot`] from a bounded sample of file records.
//! The line total and coverage are computed over the sample, not the full
//! population; `total_files` still reports the population size so report
//! consumers can see how much was left unread.

use crate::config::SubsystemKind;
use crate::models::{FileRecord, QualitySnapshot};

/// Minimum fraction of sampled files pairing `try` with `catch` for the
/// backend's error handling to count as adequate.
const ERROR_HANDLING_BAR: f64 = 0.5;

/// Aggregates sampled file records into a quality snapshot.
#[derive(Debug, Default, Clone)]
pub struct QualityMetricsCollector;

impl QualityMetricsCollector {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate a sample drawn from a population of `total_files`.
    ///
    /// With an empty sample every numeric field is zero and coverage is
    /// reported as zero rather than undefined.
    pub fn collect(
        &self,
        records: &[FileRecord],
        total_files: usize,
        kind: SubsystemKind,
    ) -> QualitySnapshot {
        let files_sampled = records.len();
        if files_sampled == 0 {
            return QualitySnapshot {
                total_files,
                error_handling: matches!(kind, SubsystemKind::Server).then_some(false),
                ..Default::default()
            };
        }

        let lines_sampled: usize = records.iter().map(|record| record.lines).sum();
        let documented = records
            .iter()
            .filter(|record| record.markers.documented)
            .count();

        let error_handling = matches!(kind, SubsystemKind::Server).then(|| {
            let guarded = records
                .iter()
                .filter(|record| record.markers.has_try && record.markers.has_catch)
                .count();
            guarded as f64 / files_sampled as f64 > ERROR_HANDLING_BAR
        });

        QualitySnapshot {
            total_files,
            files_sampled,
            lines_sampled,
            average_file_length: lines_sampled as f64 / files_sampled as f64,
            documentation_coverage: documented as f64 / files_sampled as f64 * 100.0,
            error_handling,
        }
    }
}
