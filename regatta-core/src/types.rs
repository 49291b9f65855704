//! Domain types for a reconciliation run.
//!
//! All filesystem locations use `PathBuf`. A manifest's normalized
//! relative path (`rel`) is its identity, sort key, and display form.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Default manifests root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "manifests";

/// Default upper bound on concurrent tool invocations.
pub const DEFAULT_PARALLELISM: usize = 4;

/// Default external reconciliation binary.
pub const DEFAULT_TOOL: &str = "kubectl";

// ---------------------------------------------------------------------------
// Manifest reference
// ---------------------------------------------------------------------------

/// A single configuration document discovered under the manifests root.
///
/// Immutable once discovered; the content itself is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ManifestRef {
    /// Path relative to the root, forward slashes on every platform.
    pub rel: String,
    /// Full path on disk, handed to the reconciliation command.
    pub path: PathBuf,
}

impl fmt::Display for ManifestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rel.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Configuration for one reconciliation run.
///
/// Owned by the run and immutable for its duration.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Directory scanned recursively for manifests.
    pub root: PathBuf,
    /// Optional target context, passed to the tool as `--context <id>`.
    pub context: Option<String>,
    /// Client-side dry-run. On by default; real applies are opt-in.
    pub dry_run: bool,
    /// Upper bound on concurrently running tool invocations. Coerced to
    /// at least 1 at dispatch time.
    pub parallelism: usize,
    /// External reconciliation binary to invoke.
    pub tool: String,
}

impl Default for SyncRequest {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            context: None,
            dry_run: true,
            parallelism: DEFAULT_PARALLELISM,
            tool: DEFAULT_TOOL.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcomes and report
// ---------------------------------------------------------------------------

/// Immutable record of one manifest's reconciliation attempt.
///
/// Created exactly once per discovered manifest, whether the tool ran
/// and failed or could not be launched at all.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyOutcome {
    pub manifest: ManifestRef,
    /// The invoked command line, rendered for the transcript.
    pub command: String,
    /// Exit status of the tool. Synthetic 127 when the tool could not
    /// be launched; -1 when the child died to a signal.
    pub exit_code: i32,
    /// Captured standard output, in full.
    pub stdout: String,
    /// Captured standard error, in full.
    pub stderr: String,
}

impl ApplyOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Overall status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Failure,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Success => write!(f, "success"),
            RunStatus::Failure => write!(f, "failure"),
        }
    }
}

/// Aggregate of a run, derived deterministically from the outcome set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub status: RunStatus,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_displays_as_rel_path() {
        let m = ManifestRef {
            rel: "apps/web.yaml".to_string(),
            path: PathBuf::from("/srv/manifests/apps/web.yaml"),
        };
        assert_eq!(m.to_string(), "apps/web.yaml");
    }

    #[test]
    fn request_defaults_are_safe() {
        let req = SyncRequest::default();
        assert_eq!(req.root, PathBuf::from("manifests"));
        assert!(req.dry_run, "default must be dry-run");
        assert_eq!(req.parallelism, DEFAULT_PARALLELISM);
        assert_eq!(req.tool, "kubectl");
        assert!(req.context.is_none());
    }

    #[test]
    fn outcome_success_is_exit_zero() {
        let m = ManifestRef {
            rel: "a.yaml".to_string(),
            path: PathBuf::from("a.yaml"),
        };
        let ok = ApplyOutcome {
            manifest: m.clone(),
            command: String::new(),
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
        };
        let bad = ApplyOutcome { exit_code: 127, ..ok.clone() };
        assert!(ok.succeeded());
        assert!(!bad.succeeded());
    }

    #[test]
    fn run_status_display() {
        assert_eq!(RunStatus::Success.to_string(), "success");
        assert_eq!(RunStatus::Failure.to_string(), "failure");
    }
}
