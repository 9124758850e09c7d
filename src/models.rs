//! Core data models for archaudit
//!
//! These models are used throughout the codebase for representing
//! subsystem inventories, pattern findings, quality metrics, and the
//! final architecture report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Priority levels for recommendations
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// A single actionable recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Subsystem name, or "Global" for cross-subsystem items
    pub category: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    /// Short impact label ("Sécurité", "Maintenabilité", ...)
    pub impact: String,
}

/// Markers harvested from a file body during the quality scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileMarkers {
    /// File contains a recognized comment-block marker.
    pub documented: bool,
    /// File contains a `try` marker.
    pub has_try: bool,
    /// File contains a `catch` marker.
    pub has_catch: bool,
}

/// One scanned file: path, raw line count, and detected markers.
///
/// Records are consumed by the quality aggregation and discarded; they do
/// not appear in the report.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub lines: usize,
    pub markers: FileMarkers,
}

/// Per-role mapping of role name to the ordered file identifiers found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureInventory {
    pub roles: BTreeMap<String, Vec<String>>,
}

impl StructureInventory {
    /// Identifiers recorded for a role; empty slice if the role is unknown.
    pub fn role(&self, name: &str) -> &[String] {
        self.roles.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of files recorded for a role.
    pub fn count(&self, name: &str) -> usize {
        self.role(name).len()
    }

    /// Per-role counts, used as the subsystem metrics summary.
    pub fn role_counts(&self) -> BTreeMap<String, usize> {
        self.roles
            .iter()
            .map(|(role, files)| (role.clone(), files.len()))
            .collect()
    }
}

/// Pattern flags for one subsystem: pattern name to "seen at least once".
///
/// A flag is disjunctive over the sampled files; detectors are independent
/// and never suppress each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFindings {
    pub patterns: BTreeMap<String, bool>,
}

impl PatternFindings {
    pub fn is_detected(&self, name: &str) -> bool {
        self.patterns.get(name).copied().unwrap_or(false)
    }
}

/// Security controls detected in the backend entry point.
///
/// All flags default to false; a missing entry-point file leaves them that
/// way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityPosture {
    pub jwt: bool,
    pub helmet: bool,
    pub rate_limiting: bool,
    pub cors: bool,
    pub bcrypt: bool,
    pub validation: bool,
}

impl SecurityPosture {
    /// Total number of tracked controls.
    pub const CONTROL_COUNT: usize = 6;

    /// Number of controls satisfied.
    pub fn satisfied(&self) -> usize {
        [
            self.jwt,
            self.helmet,
            self.rate_limiting,
            self.cors,
            self.bcrypt,
            self.validation,
        ]
        .iter()
        .filter(|flag| **flag)
        .count()
    }

    /// Control name to flag, in a stable order for rendering.
    pub fn as_table(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("jwt", self.jwt),
            ("helmet", self.helmet),
            ("rate_limiting", self.rate_limiting),
            ("cors", self.cors),
            ("bcrypt", self.bcrypt),
            ("validation", self.validation),
        ]
    }
}

/// Sampled quality metrics for one subsystem.
///
/// `lines_sampled` is the total over the sample only, not an extrapolated
/// population total; the sample is capped to bound scan cost on large
/// trees. With zero files found every numeric field is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualitySnapshot {
    /// Files matching the subsystem's quality extensions, full population.
    pub total_files: usize,
    /// Files actually read for metrics (bounded sample).
    pub files_sampled: usize,
    /// Line total over the sample.
    pub lines_sampled: usize,
    /// Average lines per sampled file.
    pub average_file_length: f64,
    /// Percentage of sampled files carrying a documentation marker, 0-100.
    pub documentation_coverage: f64,
    /// Backend only: more than half the sampled files pair `try` with
    /// `catch`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_handling: Option<bool>,
}

/// Declared dependencies from a `package.json`-shaped manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    pub production: BTreeMap<String, String>,
    pub development: BTreeMap<String, String>,
    pub total: usize,
}

impl DependencyManifest {
    /// Parse manifest content. Malformed JSON yields `None`; the caller
    /// degrades to the empty manifest.
    pub fn from_json(content: &str) -> Option<Self> {
        #[derive(Deserialize)]
        struct RawManifest {
            #[serde(default)]
            dependencies: BTreeMap<String, String>,
            #[serde(default, rename = "devDependencies")]
            dev_dependencies: BTreeMap<String, String>,
        }

        let raw: RawManifest = serde_json::from_str(content).ok()?;
        let total = raw.dependencies.len() + raw.dev_dependencies.len();
        Some(Self {
            production: raw.dependencies,
            development: raw.dev_dependencies,
            total,
        })
    }
}

/// Route-level detail for the backend subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub count: usize,
    /// HTTP method to handler count across route files.
    pub methods: BTreeMap<String, usize>,
    /// Extracted `/api/...` endpoints, "METHOD /path" form.
    pub endpoints: Vec<String>,
    /// Route files referencing an auth marker.
    pub protected: Vec<String>,
}

/// Service-level detail for a subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    pub count: usize,
    pub names: Vec<String>,
    /// Mobile only: services declaring a shared-instance singleton.
    pub singletons: Vec<String>,
}

/// Complete analysis snapshot for one subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubsystemAnalysis {
    /// Subsystem display name ("Mobile", "Backend", "Dashboard").
    pub subsystem: String,
    /// Root directory relative to the project root.
    pub root: PathBuf,
    pub structure: StructureInventory,
    pub patterns: PatternFindings,
    /// Backend only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityPosture>,
    pub quality: QualitySnapshot,
    pub dependencies: DependencyManifest,
    /// Backend only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<RouteSummary>,
    pub services: ServiceSummary,
    /// Dashboard only: hook identifiers seen in component files.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub hooks: Vec<String>,
    /// Backend only: ORM relation decorator count per entity file.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub entity_relations: BTreeMap<String, usize>,
    /// Counts per role, mirrored from the inventory for quick rendering.
    pub metrics: BTreeMap<String, usize>,
}

/// File totals across subsystems plus the recommendation count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalMetrics {
    pub total_mobile_files: usize,
    pub total_server_files: usize,
    pub total_dashboard_files: usize,
    pub total_recommendations: usize,
}

/// The terminal artifact of one audit run. Immutable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchitectureReport {
    pub timestamp: DateTime<Utc>,
    pub schema_version: String,
    pub mobile: SubsystemAnalysis,
    pub server: SubsystemAnalysis,
    pub dashboard: SubsystemAnalysis,
    pub recommendations: Vec<Recommendation>,
    pub metrics: GlobalMetrics,
    /// Aggregate quality score, 0-100.
    pub quality_score: f64,
}

impl ArchitectureReport {
    /// Recommendations at a given priority, in generation order.
    pub fn by_priority(&self, priority: Priority) -> Vec<&Recommendation> {
        self.recommendations
            .iter()
            .filter(|rec| rec.priority == priority)
            .collect()
    }
}
