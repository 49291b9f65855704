//! Bounded-parallel apply dispatch.
//!
//! One external tool invocation per manifest, at most `parallelism` in
//! flight. Workers claim manifest indices from a shared cursor and send
//! `(index, outcome)` down a channel; the caller drains the channel into
//! one pre-allocated slot per manifest. `thread::scope` is the barrier:
//! [`run`] cannot return before every worker has exited, so aggregation
//! never observes a partial result set.

use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use regatta_core::{ApplyOutcome, ManifestRef, SyncRequest};

use crate::error::SyncError;

/// Synthetic exit status for a tool that could not be launched.
pub const LAUNCH_FAILURE_EXIT: i32 = 127;

/// Render the invocation for `manifest` as a transcript line.
pub fn render_command(manifest: &ManifestRef, request: &SyncRequest) -> String {
    let mut line = format!("{} apply -f {}", request.tool, manifest.path.display());
    if let Some(context) = &request.context {
        line.push_str(" --context ");
        line.push_str(context);
    }
    if request.dry_run {
        line.push_str(" --dry-run=client");
    }
    line
}

/// Reconcile a single manifest.
///
/// Runs the tool to completion and captures its exit status and both
/// output streams in full. Never fails: a tool that cannot be launched
/// is reported exactly like a tool that ran and exited non-zero, with
/// the launch error in `stderr` and a synthetic exit status.
pub fn apply_one(manifest: &ManifestRef, request: &SyncRequest) -> ApplyOutcome {
    let command = render_command(manifest, request);
    tracing::debug!("applying {}", manifest.rel);

    let mut cmd = Command::new(&request.tool);
    cmd.arg("apply").arg("-f").arg(&manifest.path);
    if let Some(context) = &request.context {
        cmd.arg("--context").arg(context);
    }
    if request.dry_run {
        cmd.arg("--dry-run=client");
    }

    match cmd.output() {
        Ok(output) => ApplyOutcome {
            manifest: manifest.clone(),
            command,
            // `code()` is `None` when the child died to a signal.
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Err(err) => {
            tracing::warn!("could not launch '{}' for {}: {err}", request.tool, manifest.rel);
            ApplyOutcome {
                manifest: manifest.clone(),
                command,
                exit_code: LAUNCH_FAILURE_EXIT,
                stdout: String::new(),
                stderr: format!("failed to launch '{}': {err}", request.tool),
            }
        }
    }
}

/// Apply every manifest under the request's parallelism bound.
///
/// Returns one outcome per manifest, in manifest order, once every
/// submitted invocation has completed. All manifests are always
/// attempted; one failure never cancels or skips another, and there is
/// no retry. No timeout is enforced — a hung tool invocation hangs its
/// worker.
pub fn run(
    manifests: &[ManifestRef],
    request: &SyncRequest,
) -> Result<Vec<ApplyOutcome>, SyncError> {
    if manifests.is_empty() {
        return Ok(Vec::new());
    }

    let workers = request.parallelism.max(1).min(manifests.len());
    let cursor = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<(usize, ApplyOutcome)>();

    thread::scope(|scope| {
        for n in 0..workers {
            let tx = tx.clone();
            let cursor = &cursor;
            thread::Builder::new()
                .name(format!("apply-{n}"))
                .spawn_scoped(scope, move || loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(manifest) = manifests.get(index) else {
                        break;
                    };
                    let outcome = apply_one(manifest, request);
                    if tx.send((index, outcome)).is_err() {
                        break;
                    }
                })
                .map_err(SyncError::WorkerSpawn)?;
        }
        Ok(())
    })?;
    drop(tx);

    // Every worker has exited; the channel holds exactly one outcome per
    // claimed index.
    let mut slots: Vec<Option<ApplyOutcome>> = Vec::with_capacity(manifests.len());
    slots.resize_with(manifests.len(), || None);
    for (index, outcome) in rx {
        slots[index] = Some(outcome);
    }

    manifests
        .iter()
        .zip(slots)
        .map(|(manifest, slot)| {
            slot.ok_or_else(|| SyncError::OutcomeMissing {
                rel: manifest.rel.clone(),
            })
        })
        .collect()
}
