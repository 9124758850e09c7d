//! Best-effort file reading.
//!
//! Every read in the engine goes through [`read_lossy`], which returns
//! `None` for files that cannot be opened or decoded. Absence is a normal
//! outcome path: a file the engine cannot read contributes nothing to the
//! analysis, and the scan continues.

use std::path::Path;
use tracing::debug;

/// Read a file as UTF-8, replacing invalid sequences.
///
/// Returns `None` when the file is missing, unreadable, or not a regular
/// file. Never panics and never propagates an error.
pub fn read_lossy(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) => {
            debug!("skipping unreadable file {}: {err}", path.display());
            None
        }
    }
}

/// Number of lines in a file body.
pub fn line_count(content: &str) -> usize {
    content.lines().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn read_lossy_returns_none_for_missing_file() {
        assert!(read_lossy(&PathBuf::from("/nonexistent/archaudit/file.js")).is_none());
    }

    #[test]
    fn read_lossy_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("binary.js");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0x6f]).expect("write");

        let content = read_lossy(&path).expect("content");
        assert!(content.starts_with("fo"));
    }

    #[test]
    fn line_count_ignores_trailing_newline() {
        assert_eq!(line_count("a\nb\n"), 2);
        assert_eq!(line_count("a\nb"), 2);
        assert_eq!(line_count(""), 0);
    }
}
