//! # Resource Reconcilers
//!
//! One reconciliation routine per managed resource kind. Each routine loads
//! its desired state from the bundle, reads the matching remote state, and
//! performs the minimal create/update calls to converge it.
//!
//! All routines share the [`SyncContext`]: the bundle handle plus two named
//! client handles. In the federated-enterprise topology `federation` points
//! at the external federation server; otherwise it aliases `cluster`. Steps
//! take both and ignore the one they don't need, keeping the pipeline
//! signature uniform.

use std::sync::Arc;

use crate::api::AdminApi;
use crate::config::ConfigSource;

pub mod auth;
pub mod enterprise;
pub mod identity;
pub mod license;
pub mod rbac;

/// Everything a sync step needs: the mounted bundle and the connected
/// clients. Read-only after construction.
#[derive(Clone)]
pub struct SyncContext {
    pub config: ConfigSource,
    /// Client for the cluster being bootstrapped.
    pub cluster: Arc<dyn AdminApi>,
    /// Client for the federation server; aliases `cluster` when no external
    /// federation server is configured.
    pub federation: Arc<dyn AdminApi>,
}

impl std::fmt::Debug for SyncContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SyncContext {
    pub fn new(
        config: ConfigSource,
        cluster: Arc<dyn AdminApi>,
        federation: Arc<dyn AdminApi>,
    ) -> Self {
        Self {
            config,
            cluster,
            federation,
        }
    }
}
