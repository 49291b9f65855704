//! # regatta-sync
//!
//! The reconciliation engine: content-addressed fingerprinting, bounded
//! parallel apply dispatch, and deterministic outcome aggregation.
//!
//! Call [`pipeline::run`] to discover, fingerprint, and reconcile every
//! manifest under a root directory in one shot.

pub mod dispatch;
pub mod error;
pub mod fingerprint;
pub mod pipeline;
pub mod report;

pub use error::SyncError;
pub use pipeline::{run, SyncRun};
