//! Shared reconciliation pipeline entrypoint.
//!
//! Discover → fingerprint → dispatch → summarize. The phases are
//! strictly sequential; only dispatch is parallel internally, and it
//! fully drains before aggregation begins.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use regatta_core::{discovery, ApplyOutcome, ManifestRef, SyncReport, SyncRequest};

use crate::error::SyncError;
use crate::{dispatch, fingerprint, report};

/// Everything produced by one reconciliation run.
#[derive(Debug, Serialize)]
pub struct SyncRun {
    /// Discovered manifests, in lexicographic path order.
    pub manifests: Vec<ManifestRef>,
    /// Content digest of the manifest set. `None` when nothing was
    /// discovered — no digest is computed for an empty set.
    pub fingerprint: Option<String>,
    /// One outcome per manifest, in discovery order.
    pub outcomes: Vec<ApplyOutcome>,
    pub report: SyncReport,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u128,
}

/// Run the full pipeline for `request`.
///
/// This is the canonical entrypoint for `regatta sync`. Per-manifest
/// failures are contained in their outcomes; the only errors that
/// propagate are catastrophic engine failures.
pub fn run(request: &SyncRequest) -> Result<SyncRun, SyncError> {
    let started_at = Utc::now();
    let started = Instant::now();

    let manifests = discovery::discover(&request.root);
    tracing::info!(
        "discovered {} manifest(s) under {}",
        manifests.len(),
        request.root.display()
    );

    let fingerprint = if manifests.is_empty() {
        None
    } else {
        Some(fingerprint::fingerprint(&manifests))
    };

    let outcomes = dispatch::run(&manifests, request)?;
    let report = report::summarize(&outcomes);

    Ok(SyncRun {
        manifests,
        fingerprint,
        outcomes,
        report,
        started_at,
        duration_ms: started.elapsed().as_millis(),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use regatta_core::RunStatus;

    use super::*;

    #[test]
    fn missing_root_completes_trivially() {
        let tmp = TempDir::new().expect("tempdir");
        let request = SyncRequest {
            root: tmp.path().join("no-such-dir"),
            ..SyncRequest::default()
        };
        let run = run(&request).expect("run");
        assert!(run.manifests.is_empty());
        assert!(run.fingerprint.is_none(), "no digest for an empty set");
        assert!(run.outcomes.is_empty());
        assert_eq!(run.report.total, 0);
        assert_eq!(run.report.status, RunStatus::Success);
    }
}
