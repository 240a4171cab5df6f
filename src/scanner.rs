use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::context::Diagnostics;
use crate::models::PackageDescriptor;

/// A `package.json` found under `node_modules`.
#[derive(Debug, Clone)]
pub struct ScannedPackage {
    /// Installed name, derived from the directory: `foo` or `@scope/foo`.
    pub name: String,
    pub descriptor: PackageDescriptor,
}

/// List the packages installed directly under `<project>/node_modules`.
///
/// Scoped packages (`@scope/name`) are included; nested `node_modules` trees are
/// not walked. Directories that cannot be listed and manifests that cannot be
/// read or parsed are reported to `diag` and skipped. Results are sorted by name.
pub fn scan_node_modules<D>(project: &Path, diag: &D) -> Vec<ScannedPackage>
where
    D: Diagnostics + ?Sized,
{
    let root = project.join("node_modules");
    if !root.is_dir() {
        return Vec::new();
    }

    let mut packages = Vec::new();

    for (name, dir) in package_dirs(&root, diag) {
        let manifest = dir.join("package.json");
        if !manifest.is_file() {
            continue;
        }
        match read_descriptor(&manifest) {
            Ok(descriptor) => packages.push(ScannedPackage { name, descriptor }),
            Err(e) => diag.warn(format!("skipping {}: {:#}", name, e)),
        }
    }

    packages.sort_by(|a, b| a.name.cmp(&b.name));
    packages
}

/// Installed package directories with their names. Dot-directories such as
/// `.bin` are not packages.
fn package_dirs<D>(root: &Path, diag: &D) -> Vec<(String, PathBuf)>
where
    D: Diagnostics + ?Sized,
{
    let mut dirs = Vec::new();

    for (file_name, path) in read_subdirs(root, diag) {
        if file_name.starts_with('.') {
            continue;
        }
        if file_name.starts_with('@') {
            for (inner, inner_path) in read_subdirs(&path, diag) {
                if !inner.starts_with('.') {
                    dirs.push((format!("{}/{}", file_name, inner), inner_path));
                }
            }
        } else {
            dirs.push((file_name, path));
        }
    }

    dirs
}

fn read_subdirs<D>(dir: &Path, diag: &D) -> Vec<(String, PathBuf)>
where
    D: Diagnostics + ?Sized,
{
    let mut out = Vec::new();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            diag.warn(format!("skipping {}: failed to list directory: {}", dir.display(), e));
            return out;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                diag.warn(format!("skipping entry in {}: {}", dir.display(), e));
                continue;
            }
        };
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            out.push((name.to_string(), path));
        }
    }
    out
}

pub fn read_descriptor(path: &Path) -> Result<PackageDescriptor> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    PackageDescriptor::from_json_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AuditContext;
    use tempfile::TempDir;

    fn write_pkg(root: &Path, name: &str, json: &str) {
        let dir = root.join("node_modules").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("package.json"), json).unwrap();
    }

    #[test]
    fn test_missing_node_modules() {
        let dir = TempDir::new().unwrap();
        let ctx = AuditContext::new();
        assert!(scan_node_modules(dir.path(), &ctx).is_empty());
    }

    #[test]
    fn test_scan_plain_and_scoped() {
        let dir = TempDir::new().unwrap();
        write_pkg(dir.path(), "lodash", r#"{"name":"lodash","version":"4.17.21","license":"MIT"}"#);
        write_pkg(
            dir.path(),
            "@babel/core",
            r#"{"name":"@babel/core","version":"7.0.0","license":"MIT"}"#,
        );
        write_pkg(dir.path(), "express", r#"{"name":"express","version":"4.18.2"}"#);
        std::fs::create_dir_all(dir.path().join("node_modules").join(".bin")).unwrap();

        let ctx = AuditContext::new();
        let pkgs = scan_node_modules(dir.path(), &ctx);
        let names: Vec<_> = pkgs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["@babel/core", "express", "lodash"]);
        assert_eq!(pkgs[2].descriptor.version.as_deref(), Some("4.17.21"));
        assert!(ctx.into_diagnostics().is_empty());
    }

    #[test]
    fn test_broken_manifest_is_skipped_with_warning() {
        let dir = TempDir::new().unwrap();
        write_pkg(dir.path(), "good", r#"{"name":"good","license":"MIT"}"#);
        write_pkg(dir.path(), "broken", "{ not json");

        let ctx = AuditContext::new();
        let pkgs = scan_node_modules(dir.path(), &ctx);
        assert_eq!(pkgs.len(), 1);
        assert_eq!(pkgs[0].name, "good");

        let diags = ctx.into_diagnostics();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.starts_with("skipping broken"));
    }

    #[test]
    fn test_unlistable_directory_warns_instead_of_failing() {
        let dir = TempDir::new().unwrap();
        let ctx = AuditContext::new();
        let missing = dir.path().join("node_modules").join("@gone");
        assert!(read_subdirs(&missing, &ctx).is_empty());

        let diags = ctx.into_diagnostics();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("failed to list directory"));
    }

    #[test]
    fn test_directory_without_manifest_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("node_modules").join("empty")).unwrap();
        let ctx = AuditContext::new();
        assert!(scan_node_modules(dir.path(), &ctx).is_empty());
    }
}
