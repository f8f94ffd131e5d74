//! Typed errors for the admin API boundary.
//!
//! The reconcilers depend on two idempotence signals being distinguishable
//! from ordinary failures: a create call hitting an existing id, and an
//! activation call hitting an already-active target. Both are modeled as
//! variants with predicates rather than matched out of error messages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A create call conflicted with an existing resource of the same id.
    #[error("{kind} {id:?} already exists")]
    Duplicate { kind: &'static str, id: String },

    /// An activation call found its target already active.
    #[error("already activated")]
    AlreadyActive,

    /// The control plane rejected the call for any other reason.
    #[error("control plane returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// The call never reached the control plane.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ApiError::Duplicate { .. })
    }

    pub fn is_already_active(&self) -> bool {
        matches!(self, ApiError::AlreadyActive)
    }
}
