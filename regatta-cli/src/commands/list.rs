//! `regatta list` — discovery preview without applying anything.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use regatta_core::{discovery, types::DEFAULT_ROOT, ManifestRef};
use regatta_sync::fingerprint;

/// Arguments for `regatta list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory scanned recursively for manifests.
    #[arg(long, default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ManifestRow {
    #[tabled(rename = "manifest")]
    rel: String,
    #[tabled(rename = "bytes")]
    bytes: u64,
}

#[derive(Serialize)]
struct ListJson<'a> {
    root: String,
    total: usize,
    fingerprint: Option<&'a str>,
    manifests: Vec<&'a str>,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let manifests = discovery::discover(&self.root);
        let digest = if manifests.is_empty() {
            None
        } else {
            Some(fingerprint::fingerprint(&manifests))
        };

        if self.json {
            let payload = ListJson {
                root: self.root.display().to_string(),
                total: manifests.len(),
                fingerprint: digest.as_deref(),
                manifests: manifests.iter().map(|m| m.rel.as_str()).collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize list JSON")?
            );
            return Ok(());
        }

        println!(
            "Regatta v{} | {} manifest(s) | root: {}",
            env!("CARGO_PKG_VERSION"),
            manifests.len(),
            self.root.display(),
        );
        if manifests.is_empty() {
            println!("No manifests found.");
            return Ok(());
        }

        let rows: Vec<ManifestRow> = manifests.iter().map(manifest_row).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");

        if let Some(digest) = digest {
            println!("Fingerprint: {digest}");
        }
        Ok(())
    }
}

fn manifest_row(manifest: &ManifestRef) -> ManifestRow {
    let bytes = fs::metadata(&manifest.path).map(|m| m.len()).unwrap_or(0);
    ManifestRow {
        rel: manifest.rel.clone(),
        bytes,
    }
}
