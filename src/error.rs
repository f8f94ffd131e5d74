//! # Error Types
//!
//! The error taxonomy every sync step surfaces.
//!
//! `Skipped` is the one recoverable outcome: the step's configuration entry
//! was not present in the bundle. The pipeline runner is the single place
//! that branches on it; every other variant aborts the run.

use thiserror::Error;

use crate::api::ApiError;

/// Outcome taxonomy for a sync step.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The step's desired-state source is absent from the bundle.
    /// Logged and skipped by the pipeline runner, never fatal.
    #[error("{0}")]
    Skipped(String),

    /// Reading a bundle entry failed for a reason other than absence
    /// (permissions, corruption).
    #[error("reading config entry {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A bundle entry exists but does not decode against the expected shape.
    #[error("invalid config entry {key:?}: {reason}")]
    Decode { key: String, reason: String },

    /// A secret field referenced an environment variable that is not set.
    #[error("expected environment variable {0} is not set")]
    UnresolvedSecret(String),

    /// The control plane returned an error other than a recognized
    /// idempotence signal.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SyncError {
    /// True when the step should be logged and skipped rather than abort
    /// the run.
    pub fn is_skipped(&self) -> bool {
        matches!(self, SyncError::Skipped(_))
    }
}
