//! Regatta core library — domain types and manifest discovery.
//!
//! Public API surface:
//! - [`types`] — run configuration, manifest references, outcome records
//! - [`discovery`] — recursive, deterministic manifest discovery

pub mod discovery;
pub mod types;

pub use discovery::{discover, MANIFEST_EXTENSIONS};
pub use types::{ApplyOutcome, ManifestRef, RunStatus, SyncReport, SyncRequest};
