//! Content-addressed fingerprint over the ordered manifest set.
//!
//! A single SHA-256 context is fed, for each manifest in discovery
//! order, the normalized-path bytes and then the full file bytes. The
//! digest is an informational change signal only — it never gates
//! dispatch.

use std::fs;

use sha2::{Digest, Sha256};

use regatta_core::ManifestRef;

/// Hex digest over `(rel, bytes)` for every readable manifest, in order.
///
/// A manifest that cannot be read at hash time contributes nothing to
/// the digest; the skip is logged and the manifest remains a dispatch
/// candidate. Two runs over byte-identical trees yield identical
/// digests; any byte flip, rename, addition or removal changes it.
pub fn fingerprint(manifests: &[ManifestRef]) -> String {
    let mut hasher = Sha256::new();
    for manifest in manifests {
        match fs::read(&manifest.path) {
            Ok(bytes) => {
                hasher.update(manifest.rel.as_bytes());
                hasher.update(&bytes);
            }
            Err(err) => {
                tracing::warn!("fingerprint: skipping unreadable {}: {err}", manifest.rel);
            }
        }
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn manifest(dir: &Path, rel: &str, content: &str) -> ManifestRef {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&path, content).expect("write fixture");
        ManifestRef {
            rel: rel.to_string(),
            path,
        }
    }

    #[test]
    fn identical_sets_hash_identically() {
        let tmp = TempDir::new().expect("tempdir");
        let set = vec![
            manifest(tmp.path(), "a.yaml", "kind: A\n"),
            manifest(tmp.path(), "b.yaml", "kind: B\n"),
        ];
        assert_eq!(fingerprint(&set), fingerprint(&set));
    }

    #[test]
    fn digest_is_fixed_length_hex() {
        let tmp = TempDir::new().expect("tempdir");
        let set = vec![manifest(tmp.path(), "a.yaml", "kind: A\n")];
        let digest = fingerprint(&set);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn flipping_one_byte_changes_the_digest() {
        let tmp = TempDir::new().expect("tempdir");
        let set = vec![
            manifest(tmp.path(), "a.yaml", "replicas: 1\n"),
            manifest(tmp.path(), "b.yaml", "kind: B\n"),
        ];
        let before = fingerprint(&set);
        fs::write(&set[0].path, "replicas: 2\n").expect("rewrite");
        assert_ne!(before, fingerprint(&set));
    }

    #[test]
    fn renaming_a_manifest_changes_the_digest() {
        let tmp = TempDir::new().expect("tempdir");
        let original = vec![manifest(tmp.path(), "a.yaml", "kind: A\n")];
        let renamed = vec![manifest(tmp.path(), "z.yaml", "kind: A\n")];
        assert_ne!(fingerprint(&original), fingerprint(&renamed));
    }

    #[test]
    fn adding_or_removing_a_manifest_changes_the_digest() {
        let tmp = TempDir::new().expect("tempdir");
        let a = manifest(tmp.path(), "a.yaml", "kind: A\n");
        let b = manifest(tmp.path(), "b.yaml", "kind: B\n");
        let one = vec![a.clone()];
        let two = vec![a, b];
        assert_ne!(fingerprint(&one), fingerprint(&two));
    }

    #[test]
    #[cfg(unix)]
    fn unreadable_manifest_contributes_nothing() {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("tempdir");
        let a = manifest(tmp.path(), "a.yaml", "kind: A\n");
        let hidden = manifest(tmp.path(), "hidden.yaml", "kind: Secret\n");

        fs::set_permissions(&hidden.path, Permissions::from_mode(0o000)).expect("chmod");
        if fs::read(&hidden.path).is_ok() {
            // Permission bits are not enforced for this user (root).
            return;
        }
        let with_unreadable = fingerprint(&[a.clone(), hidden.clone()]);
        fs::set_permissions(&hidden.path, Permissions::from_mode(0o644)).expect("chmod back");

        assert_eq!(with_unreadable, fingerprint(&[a]));
    }
}
