//! Error types for the audit output surface.
//!
//! The analysis engine itself never fails: missing subsystems, unreadable
//! files, and malformed manifests all degrade to empty values. Only the
//! output side (rendering a report, writing it to disk) can return an error.

use std::io;
use thiserror::Error;

/// Errors produced while rendering or persisting an audit report.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Writing a rendered report to disk failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Serializing the report failed.
    #[error("render error: {0}")]
    Render(#[from] serde_json::Error),
}

/// Convenience result type for output operations.
pub type Result<T> = std::result::Result<T, AuditError>;
