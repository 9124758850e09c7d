//! Archaudit - architecture audit engine
//!
//! Audits a multi-subsystem product tree (mobile client, server backend,
//! web dashboard) and produces a structured architecture report: component
//! inventories, lexically detected design patterns, quality and security
//! metrics, a weighted quality score, and prioritized recommendations.
//!
//! Detection is purely lexical by design; no source is parsed, executed,
//! or mutated. The audit is read-only and always produces a report.

pub mod analyzer;
pub mod auditor;
pub mod cli;
pub mod config;
pub mod detectors;
pub mod error;
pub mod files;
pub mod models;
pub mod quality;
pub mod recommend;
pub mod reporters;
pub mod scanner;
pub mod scoring;

pub use analyzer::SubsystemAnalyzer;
pub use auditor::{ArchitectureAuditor, SCHEMA_VERSION};
pub use config::{SubsystemKind, SubsystemProfile};
pub use error::{AuditError, Result};
pub use models::{
    ArchitectureReport, DependencyManifest, PatternFindings, Priority, QualitySnapshot,
    Recommendation, SecurityPosture, StructureInventory, SubsystemAnalysis,
};
pub use quality::QualityMetricsCollector;
pub use recommend::RecommendationEngine;
pub use scanner::FileInventoryScanner;
pub use scoring::QualityScorer;
