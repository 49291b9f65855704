//! Error types for regatta-sync.
//!
//! Only catastrophic engine failures surface here. A manifest whose
//! reconciliation fails — or whose tool cannot even be launched — is
//! captured in its [`ApplyOutcome`](regatta_core::ApplyOutcome), never
//! raised as an error.

use thiserror::Error;

/// All errors that can abort a reconciliation run outright.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The worker pool could not spawn an apply thread.
    #[error("failed to spawn apply worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// A dispatched manifest produced no outcome. This indicates a bug
    /// in the collection barrier, not a tool failure.
    #[error("no outcome collected for manifest {rel}")]
    OutcomeMissing { rel: String },
}
