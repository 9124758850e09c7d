//! File inventory scanning
//!
//! Resolves a role's configured directories against a subsystem root and
//! lists the matching files. Missing directories yield empty sequences,
//! never errors. Traversal order is the natural directory-listing order;
//! nothing downstream relies on it beyond display.

use crate::config::{RoleSpec, SubsystemProfile};
use crate::models::StructureInventory;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Walks a subsystem's directory taxonomy and classifies files by role.
#[derive(Debug, Default, Clone)]
pub struct FileInventoryScanner;

impl FileInventoryScanner {
    pub fn new() -> Self {
        Self
    }

    /// List the files matching one role under `subsystem_root`.
    ///
    /// Returns absolute paths. A missing directory contributes nothing.
    pub fn scan_role(&self, subsystem_root: &Path, role: &RoleSpec) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for dir in &role.dirs {
            let base = subsystem_root.join(dir);
            if !base.is_dir() {
                debug!("role {} directory absent: {}", role.role, base.display());
                continue;
            }
            if role.recursive {
                files.extend(walk_tree(&base, &role.extensions));
            } else {
                files.extend(list_flat(&base, &role.extensions));
            }
        }
        files
    }

    /// Build the full per-role inventory for a profile.
    ///
    /// Identifiers are file names for flat roles and subsystem-relative
    /// paths for recursive roles.
    pub fn inventory(&self, project_root: &Path, profile: &SubsystemProfile) -> StructureInventory {
        let subsystem_root = project_root.join(&profile.root);
        let mut inventory = StructureInventory::default();

        for role in &profile.roles {
            let identifiers = self
                .scan_role(&subsystem_root, role)
                .iter()
                .map(|path| identifier_for(path, &subsystem_root, role.recursive))
                .collect();
            inventory.roles.insert(role.role.clone(), identifiers);
        }

        inventory
    }

    /// All files under `subsystem_root` matching the given extensions,
    /// recursively. Used for the pattern and quality samples.
    pub fn scan_tree(&self, subsystem_root: &Path, extensions: &[String]) -> Vec<PathBuf> {
        if !subsystem_root.is_dir() {
            return Vec::new();
        }
        walk_tree(subsystem_root, extensions)
    }
}

fn identifier_for(path: &Path, subsystem_root: &Path, recursive: bool) -> String {
    if recursive {
        path.strip_prefix(subsystem_root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    } else {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|want| want == ext))
        .unwrap_or(false)
}

fn list_flat(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && matches_extension(path, extensions))
        .collect()
}

fn walk_tree(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let walker = ignore::WalkBuilder::new(root).git_ignore(true).build();
    walker
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && matches_extension(path, extensions))
        .collect()
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
    fn flat_scan_ignores_subdirectories_and_other_extensions() {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = dir.path();
        touch(&root.join("Services/AuthService.swift"), "");
        touch(&root.join("Services/notes.md"), "");
        touch(&root.join("Services/nested/Deep.swift"), "");

        let scanner = FileInventoryScanner::new();
        let role = SubsystemProfile::mobile()
            .roles
            .into_iter()
            .find(|r| r.role == "services")
            .expect("services role");

        let files = scanner.scan_role(root, &role);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("AuthService.swift"));
    }

    #[test]
    fn recursive_scan_descends() {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = dir.path();
        touch(&root.join("Views/Home/HomeView.swift"), "");
        touch(&root.join("Views/LoginView.swift"), "");

        let scanner = FileInventoryScanner::new();
        let role = SubsystemProfile::mobile()
            .roles
            .into_iter()
            .find(|r| r.role == "views")
            .expect("views role");

        let files = scanner.scan_role(root, &role);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn missing_directory_yields_empty_sequence() {
        let dir = tempfile::tempdir().expect("temp dir");
        let scanner = FileInventoryScanner::new();
        let role = SubsystemProfile::server()
            .roles
            .into_iter()
            .find(|r| r.role == "routes")
            .expect("routes role");

        assert!(scanner.scan_role(dir.path(), &role).is_empty());
    }

    #[test]
    fn inventory_uses_relative_identifiers_for_recursive_roles() {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = dir.path();
        touch(&root.join("dashboard/src/components/users/UserCard.jsx"), "");
        touch(&root.join("dashboard/src/services/api.js"), "");

        let scanner = FileInventoryScanner::new();
        let inventory = scanner.inventory(root, &SubsystemProfile::dashboard());

        assert_eq!(
            inventory.role("components"),
            ["src/components/users/UserCard.jsx".to_string()]
        );
        assert_eq!(inventory.count("services"), 1);
        assert_eq!(inventory.count("pages"), 0);
    }

    #[test]
    fn scan_tree_on_missing_root_is_empty() {
        let scanner = FileInventoryScanner::new();
        let files = scanner.scan_tree(Path::new("/nonexistent/archaudit"), &["js".to_string()]);
        assert!(files.is_empty());
    }
}
