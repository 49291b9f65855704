//! Manifest discovery — recursive, extension-filtered, deterministic.
//!
//! Discovery is a pure read-only function of filesystem state at call
//! time. Results are sorted by normalized relative path so that two runs
//! over an unchanged tree always agree, on every platform.

use std::fs;
use std::path::Path;

use crate::types::ManifestRef;

/// File extensions recognized as manifests — both spellings of the same
/// format are accepted.
pub const MANIFEST_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Collect every manifest under `root`, sorted ascending by relative
/// path.
///
/// A missing or unreadable root is not an error: the result is simply
/// empty. Unreadable subdirectories are skipped and the walk continues.
pub fn discover(root: &Path) -> Vec<ManifestRef> {
    let mut manifests = Vec::new();
    walk(root, root, &mut manifests);
    manifests.sort_by(|a, b| a.rel.cmp(&b.rel));
    manifests
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<ManifestRef>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(root, &path, out);
        } else if is_manifest(&path) {
            let rel = normalize_rel(root, &path);
            out.push(ManifestRef { rel, path });
        }
    }
}

fn is_manifest(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            MANIFEST_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Root-relative path with forward slashes, so ordering and fingerprints
/// agree across platforms.
fn normalize_rel(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let rel = rel.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        rel.into_owned()
    } else {
        rel.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn manifest_extension_matching() {
        assert!(is_manifest(Path::new("deploy.yaml")));
        assert!(is_manifest(Path::new("deploy.yml")));
        assert!(is_manifest(Path::new("DEPLOY.YAML")));
        assert!(!is_manifest(Path::new("deploy.json")));
        assert!(!is_manifest(Path::new("deploy.yaml.bak")));
        assert!(!is_manifest(Path::new("yaml")));
    }

    #[test]
    fn normalize_strips_root_prefix() {
        let root = PathBuf::from("/srv/manifests");
        let path = root.join("apps").join("web.yaml");
        assert_eq!(normalize_rel(&root, &path), "apps/web.yaml");
    }
}
