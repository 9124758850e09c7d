//! Lexical pattern and security-control detection
//!
//! Detection is a fixed table of named markers evaluated independently per
//! file body. There is no parsing: a marker anywhere in the file counts,
//! including matches inside comments or strings. A pattern is reported for
//! a subsystem when at least one sampled file matches.
//!
//! Security controls are evaluated against the backend's designated entry
//! point only; if that file is absent every control stays false.

use crate::config::SubsystemKind;
use crate::models::SecurityPosture;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

type Marker = fn(&str) -> bool;

static ROUTE_METHOD: OnceLock<Regex> = OnceLock::new();
static ENDPOINT: OnceLock<Regex> = OnceLock::new();
static HOOK: OnceLock<Regex> = OnceLock::new();
static RELATION: OnceLock<Regex> = OnceLock::new();

fn route_method() -> &'static Regex {
    ROUTE_METHOD.get_or_init(|| {
        Regex::new(r"(?i)(app\.|router\.)(get|post|put|delete|patch)").expect("valid regex")
    })
}

fn endpoint() -> &'static Regex {
    ENDPOINT.get_or_init(|| {
        Regex::new(r#"(?i)(get|post|put|delete|patch)\s*\(\s*['"](/api/[^'"]+)"#)
            .expect("valid regex")
    })
}

fn hook() -> &'static Regex {
    HOOK.get_or_init(|| Regex::new(r"\buse[A-Z]\w*").expect("valid regex"))
}

fn relation() -> &'static Regex {
    RELATION.get_or_init(|| {
        Regex::new(r"@(OneToMany|ManyToOne|ManyToMany|OneToOne)").expect("valid regex")
    })
}

fn mobile_reactive_binding(content: &str) -> bool {
    content.contains("@StateObject") || content.contains("@ObservedObject")
}

fn mobile_singleton(content: &str) -> bool {
    content.contains("static let shared") || content.contains("static var shared")
}

fn mobile_observer(content: &str) -> bool {
    content.contains("@Published") || content.contains("Combine")
}

fn mobile_factory(content: &str) -> bool {
    content.contains("Factory") && content.contains("static func")
}

fn repository_marker(content: &str) -> bool {
    content.contains("Repository")
}

fn server_class_based(content: &str) -> bool {
    content.contains("class ")
}

fn server_module_exports(content: &str) -> bool {
    content.contains("module.exports")
}

fn async_await(content: &str) -> bool {
    content.contains("async") && content.contains("await")
}

fn dashboard_reactive_hooks(content: &str) -> bool {
    content.contains("useState") || content.contains("useEffect")
}

fn dashboard_context_api(content: &str) -> bool {
    content.contains("useContext")
}

fn dashboard_api_client(content: &str) -> bool {
    content.contains("axios") || content.contains("fetch(")
}

const MOBILE_TABLE: &[(&str, Marker)] = &[
    ("mvvm", mobile_reactive_binding),
    ("singleton", mobile_singleton),
    ("observer", mobile_observer),
    ("factory", mobile_factory),
    ("repository", repository_marker),
];

const SERVER_TABLE: &[(&str, Marker)] = &[
    ("class_based", server_class_based),
    ("module_exports", server_module_exports),
    ("async_await", async_await),
    ("repository", repository_marker),
];

const DASHBOARD_TABLE: &[(&str, Marker)] = &[
    ("reactive_hooks", dashboard_reactive_hooks),
    ("context_api", dashboard_context_api),
    ("api_client", dashboard_api_client),
];

/// Applies the fixed marker tables to file contents.
#[derive(Debug, Default, Clone)]
pub struct PatternDetector;

impl PatternDetector {
    pub fn new() -> Self {
        Self
    }

    /// The marker table applicable to a subsystem kind.
    pub fn table(kind: SubsystemKind) -> &'static [(&'static str, Marker)] {
        match kind {
            SubsystemKind::Mobile => MOBILE_TABLE,
            SubsystemKind::Server => SERVER_TABLE,
            SubsystemKind::Dashboard => DASHBOARD_TABLE,
        }
    }

    /// Every pattern name a subsystem kind can report.
    pub fn pattern_names(kind: SubsystemKind) -> Vec<&'static str> {
        Self::table(kind).iter().map(|(name, _)| *name).collect()
    }

    /// Names of patterns present in one file body. Detectors are
    /// independent; overlapping matches all register.
    pub fn detect(&self, content: &str, kind: SubsystemKind) -> Vec<&'static str> {
        Self::table(kind)
            .iter()
            .filter(|(_, marker)| marker(content))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl SecurityPosture {
    /// Evaluate the security-control table against the entry-point body.
    pub fn from_content(content: &str) -> Self {
        let lower = content.to_lowercase();
        Self {
            jwt: content.contains("jsonwebtoken") || lower.contains("jwt"),
            helmet: lower.contains("helmet"),
            rate_limiting: content.contains("rateLimit") || content.contains("rate-limit"),
            cors: lower.contains("cors"),
            bcrypt: lower.contains("bcrypt"),
            validation: lower.contains("validator") || content.contains("express-validator"),
        }
    }
}

/// HTTP method to handler count over a route file body.
pub fn route_methods(content: &str) -> BTreeMap<String, usize> {
    let mut methods = BTreeMap::new();
    for capture in route_method().captures_iter(content) {
        let method = capture[2].to_uppercase();
        *methods.entry(method).or_insert(0) += 1;
    }
    methods
}

/// `/api/...` endpoints declared in a route file body, "METHOD /path" form.
pub fn route_endpoints(content: &str) -> Vec<String> {
    endpoint()
        .captures_iter(content)
        .map(|capture| format!("{} {}", capture[1].to_uppercase(), &capture[2]))
        .collect()
}

/// Whether a route file references an authentication marker.
pub fn has_auth_marker(content: &str) -> bool {
    content.contains("auth") || content.contains("requireAuth") || content.contains("verifyToken")
}

/// Hook identifiers (`useXxx`) used in a component file body.
pub fn hooks(content: &str) -> Vec<String> {
    hook()
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Number of ORM relation decorators in an entity file body.
pub fn relation_count(content: &str) -> usize {
    relation().find_iter(content).count()
}

/// Whether a file body carries a recognized documentation marker.
pub fn has_doc_marker(content: &str, kind: SubsystemKind) -> bool {
    match kind {
        SubsystemKind::Mobile => content.contains("///") || content.contains("/**"),
        SubsystemKind::Server | SubsystemKind::Dashboard => {
            content.contains("///") || content.contains("/*")
        }
    }
}
