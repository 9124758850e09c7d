//! Subsystem profiles and threshold configuration
//!
//! A [`SubsystemProfile`] is a plain value describing where one subsystem
//! lives and how its files map to logical roles. The three stock profiles
//! mirror the audited product line: a Swift mobile client, a Node.js
//! backend, and a React dashboard. Profiles are never mutated during a
//! run; callers needing a different layout build their own values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Subsystem kind selects the pattern and security tables that apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubsystemKind {
    Mobile,
    Server,
    Dashboard,
}

/// One logical role inside a subsystem: which directories to scan, which
/// extensions count, and whether the scan recurses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub role: String,
    /// Directories relative to the subsystem root.
    pub dirs: Vec<String>,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
    pub recursive: bool,
}

impl RoleSpec {
    fn flat(role: &str, dir: &str, ext: &str) -> Self {
        Self {
            role: role.to_string(),
            dirs: vec![dir.to_string()],
            extensions: vec![ext.to_string()],
            recursive: false,
        }
    }

    fn recursive(role: &str, dir: &str, exts: &[&str]) -> Self {
        Self {
            role: role.to_string(),
            dirs: vec![dir.to_string()],
            extensions: exts.iter().map(|e| e.to_string()).collect(),
            recursive: true,
        }
    }
}

/// Immutable description of one subsystem for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsystemProfile {
    /// Display name, also used as the recommendation category.
    pub name: String,
    pub kind: SubsystemKind,
    /// Root directory relative to the project root.
    pub root: PathBuf,
    pub roles: Vec<RoleSpec>,
    /// Extensions scanned for the quality and pattern samples.
    pub quality_extensions: Vec<String>,
    /// Dependency manifest relative to the subsystem root, if any.
    pub manifest: Option<PathBuf>,
    /// Designated entry point for the security scan, relative to the
    /// subsystem root (backend only).
    pub entrypoint: Option<PathBuf>,
}

impl SubsystemProfile {
    /// Swift mobile client under `mobile/`.
    pub fn mobile() -> Self {
        Self {
            name: "Mobile".to_string(),
            kind: SubsystemKind::Mobile,
            root: PathBuf::from("mobile"),
            roles: vec![
                RoleSpec::flat("models", "Models", "swift"),
                RoleSpec::recursive("views", "Views", &["swift"]),
                RoleSpec::flat("viewmodels", "ViewModels", "swift"),
                RoleSpec::flat("services", "Services", "swift"),
                RoleSpec::flat("extensions", "Extensions", "swift"),
            ],
            quality_extensions: vec!["swift".to_string()],
            // The mobile client declares dependencies through its Xcode
            // project, not a JSON manifest.
            manifest: None,
            entrypoint: None,
        }
    }

    /// Node.js backend under `backend/`.
    pub fn server() -> Self {
        Self {
            name: "Backend".to_string(),
            kind: SubsystemKind::Server,
            root: PathBuf::from("backend"),
            roles: vec![
                RoleSpec::flat("routes", "routes", "js"),
                RoleSpec::flat("services", "services", "js"),
                RoleSpec::flat("middlewares", "middlewares", "js"),
                RoleSpec::flat("entities", "entities", "js"),
                RoleSpec::flat("models", "models", "js"),
                RoleSpec::flat("utils", "utils", "js"),
                RoleSpec::flat("config", "config", "js"),
            ],
            quality_extensions: vec!["js".to_string()],
            manifest: Some(PathBuf::from("package.json")),
            entrypoint: Some(PathBuf::from("server.js")),
        }
    }

    /// React dashboard under `dashboard/`.
    pub fn dashboard() -> Self {
        Self {
            name: "Dashboard".to_string(),
            kind: SubsystemKind::Dashboard,
            root: PathBuf::from("dashboard"),
            roles: vec![
                RoleSpec::recursive("components", "src/components", &["jsx"]),
                RoleSpec::recursive("pages", "src/pages", &["jsx"]),
                RoleSpec::recursive("services", "src/services", &["js"]),
                RoleSpec::recursive("utils", "src/utils", &["js"]),
            ],
            quality_extensions: vec!["js".to_string(), "jsx".to_string()],
            manifest: Some(PathBuf::from("package.json")),
            entrypoint: None,
        }
    }

    /// Rebind the subsystem root, keeping the taxonomy.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }
}

/// Threshold constants for recommendation rules and sampling caps.
pub mod thresholds {
    /// Mobile documentation coverage below this percentage draws a
    /// recommendation.
    pub const DOC_THRESHOLD_MOBILE: f64 = 50.0;
    /// Dashboard documentation coverage below this percentage draws a
    /// recommendation.
    pub const DOC_THRESHOLD_DASHBOARD: f64 = 30.0;
    /// Service count above this draws a reorganization recommendation.
    pub const SERVICE_COUNT_ALERT: usize = 15;
    /// Files read per subsystem for the pattern scan.
    pub const PATTERN_SAMPLE_CAP: usize = 50;
    /// Files read per subsystem for the quality scan.
    pub const QUALITY_SAMPLE_CAP: usize = 100;
}
