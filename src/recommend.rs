//! Recommendation rules
//!
//! Independent threshold rules evaluated over the three subsystem
//! snapshots plus ambient filesystem checks. Each rule contributes zero or
//! one recommendation; rules never suppress each other. Evaluation order
//! is fixed (mobile, server, dashboard, global) and is the stable
//! tie-break for equal-priority items downstream.
//!
//! Titles and descriptions stay in French: the audited product line is
//! operated by a French-speaking team and the recommendation catalog is
//! operator-facing text, not code.

use crate::config::thresholds;
use crate::models::{Priority, Recommendation, SubsystemAnalysis};
use std::path::Path;
use tracing::debug;

/// Evaluates the recommendation rule set.
#[derive(Debug, Default, Clone)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run every rule in fixed order and collect the emitted items.
    /// Pure with respect to its inputs: the same snapshots yield the same
    /// sequence.
    pub fn evaluate(
        &self,
        project_root: &Path,
        mobile: &SubsystemAnalysis,
        server: &SubsystemAnalysis,
        dashboard: &SubsystemAnalysis,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();
        self.mobile_rules(project_root, mobile, &mut recommendations);
        self.server_rules(project_root, server, &mut recommendations);
        self.dashboard_rules(dashboard, &mut recommendations);
        self.global_rules(project_root, server, &mut recommendations);
        debug!("{} recommendations emitted", recommendations.len());
        recommendations
    }

    fn mobile_rules(
        &self,
        project_root: &Path,
        mobile: &SubsystemAnalysis,
        out: &mut Vec<Recommendation>,
    ) {
        let coverage = mobile.quality.documentation_coverage;
        if coverage < thresholds::DOC_THRESHOLD_MOBILE {
            out.push(Recommendation {
                category: mobile.subsystem.clone(),
                priority: Priority::Medium,
                title: "Améliorer la documentation du code mobile".to_string(),
                description: format!(
                    "Seulement {coverage:.1}% des fichiers sont documentés. Ajoutez des commentaires pour améliorer la maintenabilité."
                ),
                impact: "Maintenabilité".to_string(),
            });
        }

        if !has_test_directory(&project_root.join(&mobile.root)) {
            out.push(Recommendation {
                category: mobile.subsystem.clone(),
                priority: Priority::High,
                title: "Ajouter des tests unitaires mobile".to_string(),
                description: "Aucun test unitaire détecté. Ajoutez des tests pour les ViewModels et Services critiques.".to_string(),
                impact: "Qualité".to_string(),
            });
        }

        let service_count = mobile.services.count;
        if service_count > thresholds::SERVICE_COUNT_ALERT {
            out.push(Recommendation {
                category: mobile.subsystem.clone(),
                priority: Priority::Low,
                title: "Réorganiser les services".to_string(),
                description: format!(
                    "{service_count} services détectés. Considérez regrouper les services liés."
                ),
                impact: "Organisation".to_string(),
            });
        }
    }

    fn server_rules(
        &self,
        project_root: &Path,
        server: &SubsystemAnalysis,
        out: &mut Vec<Recommendation>,
    ) {
        let posture = server.security.unwrap_or_default();
        if !(posture.jwt && posture.helmet && posture.rate_limiting) {
            out.push(Recommendation {
                category: server.subsystem.clone(),
                priority: Priority::High,
                title: "Renforcer la sécurité".to_string(),
                description: "Certaines mesures de sécurité ne sont pas implémentées. Vérifiez JWT, Helmet et Rate Limiting.".to_string(),
                impact: "Sécurité".to_string(),
            });
        }

        if server.quality.error_handling != Some(true) {
            out.push(Recommendation {
                category: server.subsystem.clone(),
                priority: Priority::High,
                title: "Améliorer la gestion d'erreurs".to_string(),
                description: "La gestion d'erreurs pourrait être améliorée. Implémentez un middleware de gestion d'erreurs centralisé.".to_string(),
                impact: "Fiabilité".to_string(),
            });
        }

        if !project_root.join(&server.root).join("__tests__").is_dir() {
            out.push(Recommendation {
                category: server.subsystem.clone(),
                priority: Priority::High,
                title: "Ajouter des tests backend".to_string(),
                description: "Aucun test backend détecté. Ajoutez des tests unitaires et d'intégration.".to_string(),
                impact: "Qualité".to_string(),
            });
        }
    }

    fn dashboard_rules(&self, dashboard: &SubsystemAnalysis, out: &mut Vec<Recommendation>) {
        let coverage = dashboard.quality.documentation_coverage;
        if coverage < thresholds::DOC_THRESHOLD_DASHBOARD {
            out.push(Recommendation {
                category: dashboard.subsystem.clone(),
                priority: Priority::Low,
                title: "Améliorer la documentation React".to_string(),
                description: format!("Seulement {coverage:.1}% des fichiers sont documentés."),
                impact: "Maintenabilité".to_string(),
            });
        }
    }

    fn global_rules(
        &self,
        project_root: &Path,
        server: &SubsystemAnalysis,
        out: &mut Vec<Recommendation>,
    ) {
        // Root-independent: always fires.
        out.push(Recommendation {
            category: "Global".to_string(),
            priority: Priority::High,
            title: "Implémenter le monitoring".to_string(),
            description: "Ajoutez un système de monitoring (ex: Winston pour les logs, Prometheus pour les métriques).".to_string(),
            impact: "Observabilité".to_string(),
        });

        let has_ci = project_root.join(".github/workflows").is_dir()
            || project_root.join(".gitlab-ci.yml").is_file();
        if !has_ci {
            out.push(Recommendation {
                category: "Global".to_string(),
                priority: Priority::Medium,
                title: "Configurer CI/CD".to_string(),
                description: "Configurez un pipeline CI/CD pour automatiser les tests et le déploiement.".to_string(),
                impact: "DevOps".to_string(),
            });
        }

        if !project_root.join(&server.root).join("swagger.json").is_file() {
            out.push(Recommendation {
                category: "Global".to_string(),
                priority: Priority::Medium,
                title: "Documenter l'API".to_string(),
                description: "Ajoutez la documentation Swagger/OpenAPI pour l'API backend.".to_string(),
                impact: "Documentation".to_string(),
            });
        }
    }
}

/// Whether a subsystem root contains a directory that looks like a test
/// suite (`Tests`, `tests`, `__tests__`, `FooTests`, ...).
fn has_test_directory(subsystem_root: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(subsystem_root) else {
        return false;
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .any(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .to_lowercase()
                .contains("test")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SecurityPosture;
    use std::path::PathBuf;

    fn analysis(name: &str, root: &str) -> SubsystemAnalysis {
        SubsystemAnalysis {
            subsystem: name.to_string(),
            root: PathBuf::from(root),
            ..Default::default()
        }
    }

    fn snapshots() -> (SubsystemAnalysis, SubsystemAnalysis, SubsystemAnalysis) {
        let mobile = analysis("Mobile", "mobile");
        let mut server = analysis("Backend", "backend");
        server.security = Some(SecurityPosture::default());
        let dashboard = analysis("Dashboard", "dashboard");
        (mobile, server, dashboard)
    }

    #[test]
    fn security_rule_fires_when_a_required_control_is_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (mobile, mut server, dashboard) = snapshots();
        server.security = Some(SecurityPosture {
            jwt: true,
            bcrypt: true,
            ..Default::default()
        });

        let recommendations =
            RecommendationEngine::new().evaluate(dir.path(), &mobile, &server, &dashboard);

        let security = recommendations
            .iter()
            .find(|rec| rec.title == "Renforcer la sécurité")
            .expect("security recommendation");
        assert_eq!(security.priority, Priority::High);
        assert_eq!(security.category, "Backend");
    }

    #[test]
    fn security_rule_stays_quiet_when_required_controls_hold() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (mobile, mut server, dashboard) = snapshots();
        server.security = Some(SecurityPosture {
            jwt: true,
            helmet: true,
            rate_limiting: true,
            ..Default::default()
        });

        let recommendations =
            RecommendationEngine::new().evaluate(dir.path(), &mobile, &server, &dashboard);

        assert!(recommendations
            .iter()
            .all(|rec| rec.title != "Renforcer la sécurité"));
    }

    #[test]
    fn monitoring_rule_is_root_independent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (mobile, server, dashboard) = snapshots();

        let recommendations =
            RecommendationEngine::new().evaluate(dir.path(), &mobile, &server, &dashboard);

        assert!(recommendations
            .iter()
            .any(|rec| rec.title == "Implémenter le monitoring" && rec.priority == Priority::High));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (mobile, server, dashboard) = snapshots();
        let engine = RecommendationEngine::new();

        let first = engine.evaluate(dir.path(), &mobile, &server, &dashboard);
        let second = engine.evaluate(dir.path(), &mobile, &server, &dashboard);

        assert_eq!(first, second);
    }

    #[test]
    fn categories_appear_in_fixed_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (mobile, server, dashboard) = snapshots();

        let recommendations =
            RecommendationEngine::new().evaluate(dir.path(), &mobile, &server, &dashboard);

        let order: Vec<&str> = recommendations
            .iter()
            .map(|rec| rec.category.as_str())
            .collect();
        let first_backend = order.iter().position(|c| *c == "Backend").expect("backend");
        let last_mobile = order
            .iter()
            .rposition(|c| *c == "Mobile")
            .expect("mobile rules fire on empty snapshots");
        let first_global = order.iter().position(|c| *c == "Global").expect("global");
        assert!(last_mobile < first_backend);
        assert!(first_backend < first_global);
    }

    #[test]
    fn service_count_alert_uses_threshold() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (mut mobile, server, dashboard) = snapshots();
        mobile.services.count = 16;

        let recommendations =
            RecommendationEngine::new().evaluate(dir.path(), &mobile, &server, &dashboard);

        let reorg = recommendations
            .iter()
            .find(|rec| rec.title == "Réorganiser les services")
            .expect("service alert");
        assert_eq!(reorg.priority, Priority::Low);
        assert!(reorg.description.starts_with("16 services"));
    }

    #[test]
    fn test_directory_silences_mobile_test_rule() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("mobile/AppTests")).expect("create dirs");
        let (mobile, server, dashboard) = snapshots();

        let recommendations =
            RecommendationEngine::new().evaluate(dir.path(), &mobile, &server, &dashboard);

        assert!(recommendations
            .iter()
            .all(|rec| rec.title != "Ajouter des tests unitaires mobile"));
    }
}
