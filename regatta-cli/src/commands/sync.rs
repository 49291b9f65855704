//! `regatta sync` — reconcile every manifest under the root.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use regatta_core::{
    types::{DEFAULT_PARALLELISM, DEFAULT_ROOT, DEFAULT_TOOL},
    SyncRequest,
};
use regatta_sync::{pipeline, SyncRun};

/// Arguments for `regatta sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Directory scanned recursively for manifests.
    #[arg(long, default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Target context handed to the tool as `--context <name>`.
    #[arg(long)]
    pub context: Option<String>,

    /// Perform a real apply. Without this flag every invocation runs
    /// with `--dry-run=client`.
    #[arg(long)]
    pub apply: bool,

    /// Maximum number of concurrent tool invocations.
    #[arg(long, short = 'j', default_value_t = DEFAULT_PARALLELISM)]
    pub parallelism: usize,

    /// Reconciliation binary to invoke.
    #[arg(long, default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Emit machine-readable JSON instead of the transcript.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let request = SyncRequest {
            root: self.root,
            context: self.context,
            dry_run: !self.apply,
            parallelism: self.parallelism,
            tool: self.tool,
        };

        let run = pipeline::run(&request)
            .with_context(|| format!("sync failed for {}", request.root.display()))?;

        if self.json {
            print_json(&request, &run)?;
        } else {
            print_transcript(&request, &run);
        }

        // The full report is always printed first; the aggregate failure
        // only shows in the summary line and the exit status.
        if run.report.failed > 0 {
            std::process::exit(1);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Human transcript
// ---------------------------------------------------------------------------

fn print_transcript(request: &SyncRequest, run: &SyncRun) {
    let mode = if request.dry_run { "dry-run" } else { "apply" };
    println!(
        "Syncing {} manifest(s) from {} [{mode}]",
        run.manifests.len(),
        request.root.display(),
    );
    if let Some(digest) = &run.fingerprint {
        println!("Fingerprint: {digest}");
    }

    for outcome in &run.outcomes {
        println!();
        println!("{} {}", "→".bold(), outcome.command);
        for line in outcome.stdout.lines() {
            println!("  {line}");
        }
        for line in outcome.stderr.lines() {
            println!("  {} {line}", "!".red());
        }
        let marker = if outcome.succeeded() {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        println!("{marker} {} (exit {})", outcome.manifest.rel, outcome.exit_code);
    }

    println!();
    let summary = format!(
        "{} succeeded, {} failed",
        run.report.succeeded, run.report.failed
    );
    if run.report.failed == 0 {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.red().bold());
    }
}

// ---------------------------------------------------------------------------
// JSON payload
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SyncRunJson<'a> {
    summary: SummaryJson<'a>,
    manifests: Vec<OutcomeJson<'a>>,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    root: String,
    mode: &'a str,
    total: usize,
    succeeded: usize,
    failed: usize,
    status: String,
    fingerprint: Option<&'a str>,
    started_at: String,
    duration_ms: u128,
}

#[derive(Serialize)]
struct OutcomeJson<'a> {
    manifest: &'a str,
    command: &'a str,
    exit_code: i32,
    stdout: &'a str,
    stderr: &'a str,
}

fn print_json(request: &SyncRequest, run: &SyncRun) -> Result<()> {
    let payload = SyncRunJson {
        summary: SummaryJson {
            root: request.root.display().to_string(),
            mode: if request.dry_run { "dry-run" } else { "apply" },
            total: run.report.total,
            succeeded: run.report.succeeded,
            failed: run.report.failed,
            status: run.report.status.to_string(),
            fingerprint: run.fingerprint.as_deref(),
            started_at: run.started_at.to_rfc3339(),
            duration_ms: run.duration_ms,
        },
        manifests: run
            .outcomes
            .iter()
            .map(|outcome| OutcomeJson {
                manifest: outcome.manifest.rel.as_str(),
                command: outcome.command.as_str(),
                exit_code: outcome.exit_code,
                stdout: outcome.stdout.as_str(),
                stderr: outcome.stderr.as_str(),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize sync JSON")?
    );
    Ok(())
}
