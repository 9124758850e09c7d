//! Per-subsystem analysis
//!
//! One analyzer type covers all three subsystems; the profile supplies the
//! directory taxonomy and selects the pattern/security tables. A missing
//! subsystem root is not an error: every sub-analysis degrades to its
//! empty or zero form and the run continues.

use crate::config::{thresholds, SubsystemKind, SubsystemProfile};
use crate::detectors::{self, PatternDetector};
use crate::files;
use crate::models::{
    DependencyManifest, FileMarkers, FileRecord, PatternFindings, QualitySnapshot, RouteSummary,
    SecurityPosture, ServiceSummary, SubsystemAnalysis,
};
use crate::quality::QualityMetricsCollector;
use crate::scanner::FileInventoryScanner;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Orchestrates inventory, pattern detection, quality sampling, and
/// dependency extraction for one subsystem.
#[derive(Debug, Clone)]
pub struct SubsystemAnalyzer {
    profile: SubsystemProfile,
    scanner: FileInventoryScanner,
    detector: PatternDetector,
    collector: QualityMetricsCollector,
}

impl SubsystemAnalyzer {
    pub fn new(profile: SubsystemProfile) -> Self {
        Self {
            profile,
            scanner: FileInventoryScanner::new(),
            detector: PatternDetector::new(),
            collector: QualityMetricsCollector::new(),
        }
    }

    pub fn profile(&self) -> &SubsystemProfile {
        &self.profile
    }

    /// Produce the full analysis snapshot for this subsystem.
    pub fn analyze(&self, project_root: &Path) -> SubsystemAnalysis {
        let subsystem_root = project_root.join(&self.profile.root);
        let kind = self.profile.kind;

        let structure = self.scanner.inventory(project_root, &self.profile);
        let tree_files = self
            .scanner
            .scan_tree(&subsystem_root, &self.profile.quality_extensions);

        let patterns = self.detect_patterns(&tree_files, kind);
        let quality = self.sample_quality(&tree_files, kind);
        let security = self.scan_entrypoint(&subsystem_root);
        let dependencies = self.read_manifest(&subsystem_root);
        let services = self.summarize_services(&subsystem_root, kind);

        let routes = matches!(kind, SubsystemKind::Server)
            .then(|| self.summarize_routes(&subsystem_root));
        let hooks = match kind {
            SubsystemKind::Dashboard => self.harvest_hooks(&subsystem_root),
            _ => Vec::new(),
        };
        let entity_relations = match kind {
            SubsystemKind::Server => self.entity_relations(&subsystem_root),
            _ => BTreeMap::new(),
        };

        let metrics = structure.role_counts();
        info!(
            "analyzed {}: {} files, {} roles",
            self.profile.name,
            quality.total_files,
            metrics.len()
        );

        SubsystemAnalysis {
            subsystem: self.profile.name.clone(),
            root: self.profile.root.clone(),
            structure,
            patterns,
            security,
            quality,
            dependencies,
            routes,
            services,
            hooks,
            entity_relations,
            metrics,
        }
    }

    /// Evaluate the pattern table over a bounded sample of the tree.
    /// A flag is set when at least one sampled file matches.
    fn detect_patterns(&self, tree_files: &[PathBuf], kind: SubsystemKind) -> PatternFindings {
        let mut patterns: BTreeMap<String, bool> = PatternDetector::pattern_names(kind)
            .into_iter()
            .map(|name| (name.to_string(), false))
            .collect();

        for path in tree_files.iter().take(thresholds::PATTERN_SAMPLE_CAP) {
            let Some(content) = files::read_lossy(path) else {
                continue;
            };
            for name in self.detector.detect(&content, kind) {
                patterns.insert(name.to_string(), true);
            }
        }

        PatternFindings { patterns }
    }

    /// Read a bounded sample of the tree and aggregate quality metrics.
    fn sample_quality(&self, tree_files: &[PathBuf], kind: SubsystemKind) -> QualitySnapshot {
        let records: Vec<FileRecord> = tree_files
            .iter()
            .take(thresholds::QUALITY_SAMPLE_CAP)
            .filter_map(|path| {
                let content = files::read_lossy(path)?;
                Some(FileRecord {
                    path: path.clone(),
                    lines: files::line_count(&content),
                    markers: FileMarkers {
                        documented: detectors::has_doc_marker(&content, kind),
                        has_try: content.contains("try"),
                        has_catch: content.contains("catch"),
                    },
                })
            })
            .collect();

        self.collector.collect(&records, tree_files.len(), kind)
    }

    /// Evaluate security controls against the designated entry point.
    /// No entry point configured means no security table; a configured but
    /// absent file reports every control false.
    fn scan_entrypoint(&self, subsystem_root: &Path) -> Option<SecurityPosture> {
        let entrypoint = self.profile.entrypoint.as_ref()?;
        let path = subsystem_root.join(entrypoint);
        let posture = match files::read_lossy(&path) {
            Some(content) => SecurityPosture::from_content(&content),
            None => {
                debug!("entry point absent: {}", path.display());
                SecurityPosture::default()
            }
        };
        Some(posture)
    }

    /// Parse the dependency manifest if one is configured and present.
    /// Malformed content degrades to the empty manifest.
    fn read_manifest(&self, subsystem_root: &Path) -> DependencyManifest {
        let Some(manifest) = self.profile.manifest.as_ref() else {
            return DependencyManifest::default();
        };
        let path = subsystem_root.join(manifest);
        let Some(content) = files::read_lossy(&path) else {
            return DependencyManifest::default();
        };
        DependencyManifest::from_json(&content).unwrap_or_else(|| {
            warn!("malformed manifest at {}, treating as empty", path.display());
            DependencyManifest::default()
        })
    }

    fn role_files(&self, subsystem_root: &Path, role: &str) -> Vec<PathBuf> {
        self.profile
            .roles
            .iter()
            .find(|spec| spec.role == role)
            .map(|spec| self.scanner.scan_role(subsystem_root, spec))
            .unwrap_or_default()
    }

    fn summarize_services(&self, subsystem_root: &Path, kind: SubsystemKind) -> ServiceSummary {
        let files_found = self.role_files(subsystem_root, "services");
        let names: Vec<String> = files_found.iter().map(|path| stem(path)).collect();

        let singletons = match kind {
            SubsystemKind::Mobile => files_found
                .iter()
                .filter_map(|path| {
                    let content = files::read_lossy(path)?;
                    (content.contains("static let shared")
                        || content.contains("static var shared"))
                    .then(|| stem(path))
                })
                .collect(),
            _ => Vec::new(),
        };

        ServiceSummary {
            count: names.len(),
            names,
            singletons,
        }
    }

    fn summarize_routes(&self, subsystem_root: &Path) -> RouteSummary {
        let mut summary = RouteSummary::default();
        for path in self.role_files(subsystem_root, "routes") {
            summary.count += 1;
            let Some(content) = files::read_lossy(&path) else {
                continue;
            };
            for (method, count) in detectors::route_methods(&content) {
                *summary.methods.entry(method).or_insert(0) += count;
            }
            summary.endpoints.extend(detectors::route_endpoints(&content));
            if detectors::has_auth_marker(&content) {
                summary.protected.push(stem(&path));
            }
        }
        summary
    }

    fn harvest_hooks(&self, subsystem_root: &Path) -> Vec<String> {
        let mut seen = Vec::new();
        for path in self.role_files(subsystem_root, "components") {
            let Some(content) = files::read_lossy(&path) else {
                continue;
            };
            for hook in detectors::hooks(&content) {
                if !seen.contains(&hook) {
                    seen.push(hook);
                }
            }
        }
        seen
    }

    fn entity_relations(&self, subsystem_root: &Path) -> BTreeMap<String, usize> {
        self.role_files(subsystem_root, "entities")
            .iter()
            .filter_map(|path| {
                let content = files::read_lossy(path)?;
                Some((stem(path), detectors::relation_count(&content)))
            })
            .collect()
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubsystemProfile;

    fn touch(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create dirs");
        }
        std::fs::write(path, content).expect("write file");
    }

    #[test]
    fn missing_root_degrades_to_empty_analysis() {
        let dir = tempfile::tempdir().expect("temp dir");
        let analyzer = SubsystemAnalyzer::new(SubsystemProfile::server());

        let analysis = analyzer.analyze(dir.path());

        assert_eq!(analysis.subsystem, "Backend");
        for role in ["routes", "services", "middlewares", "entities"] {
            assert!(analysis.structure.role(role).is_empty());
        }
        assert_eq!(analysis.quality.total_files, 0);
        assert_eq!(analysis.quality.documentation_coverage, 0.0);
        assert!(analysis.patterns.patterns.values().all(|flag| !flag));
        assert_eq!(analysis.security.expect("server posture").satisfied(), 0);
        assert_eq!(analysis.dependencies.total, 0);
        assert_eq!(analysis.routes.expect("route summary").count, 0);
    }

    #[test]
    fn server_analysis_reads_manifest_and_entrypoint() {
        let dir = tempfile::tempdir().expect("temp dir");
        let backend = dir.path().join("backend");
        touch(
            &backend.join("package.json"),
            r#"{"dependencies": {"express": "4.18.0"}, "devDependencies": {}}"#,
        );
        touch(
            &backend.join("server.js"),
            "const helmet = require('helmet');\nconst cors = require('cors');\napp.use(helmet());\n",
        );
        touch(
            &backend.join("routes/rides.js"),
            "router.get('/api/rides', requireAuth, list);\nrouter.post('/api/rides', create);\n",
        );
        touch(
            &backend.join("services/rideService.js"),
            "/** Ride lookups */\nclass RideService {}\nmodule.exports = RideService;\n",
        );

        let analyzer = SubsystemAnalyzer::new(SubsystemProfile::server());
        let analysis = analyzer.analyze(dir.path());

        assert_eq!(analysis.dependencies.total, 1);
        let posture = analysis.security.expect("posture");
        assert!(posture.helmet);
        assert!(posture.cors);
        assert!(!posture.bcrypt);

        let routes = analysis.routes.expect("routes");
        assert_eq!(routes.count, 1);
        assert_eq!(routes.methods.get("GET"), Some(&1));
        assert_eq!(routes.protected, vec!["rides".to_string()]);

        assert!(analysis.patterns.is_detected("class_based"));
        assert!(analysis.patterns.is_detected("module_exports"));
        assert_eq!(analysis.services.names, vec!["rideService".to_string()]);
        assert_eq!(analysis.metrics.get("routes"), Some(&1));
    }

    #[test]
    fn malformed_manifest_degrades_to_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        touch(&dir.path().join("backend/package.json"), "{broken");

        let analyzer = SubsystemAnalyzer::new(SubsystemProfile::server());
        let analysis = analyzer.analyze(dir.path());

        assert_eq!(analysis.dependencies.total, 0);
        assert!(analysis.dependencies.production.is_empty());
    }

    #[test]
    fn mobile_analysis_flags_singleton_services() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mobile = dir.path().join("mobile");
        touch(
            &mobile.join("Services/SessionService.swift"),
            "final class SessionService {\n    static let shared = SessionService()\n}\n",
        );
        touch(
            &mobile.join("Services/GeoService.swift"),
            "struct GeoService {}\n",
        );
        touch(
            &mobile.join("Views/Home/HomeView.swift"),
            "struct HomeView: View {\n    @StateObject var model = HomeModel()\n}\n",
        );

        let analyzer = SubsystemAnalyzer::new(SubsystemProfile::mobile());
        let analysis = analyzer.analyze(dir.path());

        assert_eq!(analysis.services.count, 2);
        assert_eq!(analysis.services.singletons, vec!["SessionService".to_string()]);
        assert!(analysis.patterns.is_detected("mvvm"));
        assert!(analysis.patterns.is_detected("singleton"));
        assert!(analysis.security.is_none());
        assert_eq!(analysis.structure.count("views"), 1);
    }

    #[test]
    fn dashboard_analysis_collects_hooks() {
        let dir = tempfile::tempdir().expect("temp dir");
        let dash = dir.path().join("dashboard");
        touch(
            &dash.join("src/components/UserTable.jsx"),
            "const [rows, setRows] = useState([]);\nuseEffect(() => load(), []);\n",
        );

        let analyzer = SubsystemAnalyzer::new(SubsystemProfile::dashboard());
        let analysis = analyzer.analyze(dir.path());

        assert!(analysis.hooks.contains(&"useState".to_string()));
        assert!(analysis.hooks.contains(&"useEffect".to_string()));
        assert!(analysis.patterns.is_detected("reactive_hooks"));
    }
}
