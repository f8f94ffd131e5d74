//! # Pipeline Runner
//!
//! The fixed, ordered list of sync steps and the loop that drives them.
//!
//! Ordering is load-bearing: authentication must activate before role
//! bindings (they require an authenticated principal context) and before
//! the auth/OIDC configuration steps are meaningful, and federation must be
//! established before enterprise activation references it. Steps whose
//! bundle entry is absent are skipped; the first hard failure aborts the
//! run.

use futures::future::BoxFuture;
use tracing::{error, info};

use crate::error::SyncError;
use crate::reconciler::{self, SyncContext};

type StepFn = for<'a> fn(&'a SyncContext) -> BoxFuture<'a, Result<(), SyncError>>;

/// One named unit of the pipeline. The step list is plain data: there is no
/// polymorphism here beyond the uniform call shape.
pub struct SyncStep {
    pub name: &'static str,
    f: StepFn,
}

impl std::fmt::Debug for SyncStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncStep").field("name", &self.name).finish()
    }
}

impl SyncStep {
    pub async fn run(&self, ctx: &SyncContext) -> Result<(), SyncError> {
        (self.f)(ctx).await
    }
}

fn license_key(ctx: &SyncContext) -> BoxFuture<'_, Result<(), SyncError>> {
    Box::pin(reconciler::license::sync(ctx))
}

fn embedded_enterprise_server(ctx: &SyncContext) -> BoxFuture<'_, Result<(), SyncError>> {
    Box::pin(reconciler::enterprise::embedded_server(ctx))
}

fn sync_enterprise_clusters(ctx: &SyncContext) -> BoxFuture<'_, Result<(), SyncError>> {
    Box::pin(reconciler::enterprise::sync_clusters(ctx))
}

fn activate_enterprise(ctx: &SyncContext) -> BoxFuture<'_, Result<(), SyncError>> {
    Box::pin(reconciler::enterprise::activate(ctx))
}

fn activate_authentication(ctx: &SyncContext) -> BoxFuture<'_, Result<(), SyncError>> {
    Box::pin(reconciler::auth::activate(ctx))
}

fn configure_identity_service(ctx: &SyncContext) -> BoxFuture<'_, Result<(), SyncError>> {
    Box::pin(reconciler::identity::configure_service(ctx))
}

fn sync_oidc_clients(ctx: &SyncContext) -> BoxFuture<'_, Result<(), SyncError>> {
    Box::pin(reconciler::identity::sync_oidc_clients(ctx))
}

fn configure_auth(ctx: &SyncContext) -> BoxFuture<'_, Result<(), SyncError>> {
    Box::pin(reconciler::auth::configure(ctx))
}

fn sync_identity_providers(ctx: &SyncContext) -> BoxFuture<'_, Result<(), SyncError>> {
    Box::pin(reconciler::identity::sync_idp_connectors(ctx))
}

fn sync_cluster_role_bindings(ctx: &SyncContext) -> BoxFuture<'_, Result<(), SyncError>> {
    Box::pin(reconciler::rbac::sync_role_bindings(ctx))
}

static SYNC_STEPS: &[SyncStep] = &[
    SyncStep {
        name: "license key",
        f: license_key,
    },
    SyncStep {
        name: "embedded enterprise server",
        f: embedded_enterprise_server,
    },
    SyncStep {
        name: "sync enterprise clusters",
        f: sync_enterprise_clusters,
    },
    SyncStep {
        name: "activate enterprise",
        f: activate_enterprise,
    },
    SyncStep {
        name: "activate authentication",
        f: activate_authentication,
    },
    SyncStep {
        name: "configure identity service",
        f: configure_identity_service,
    },
    SyncStep {
        name: "sync oidc clients",
        f: sync_oidc_clients,
    },
    SyncStep {
        name: "configure auth",
        f: configure_auth,
    },
    SyncStep {
        name: "sync identity providers",
        f: sync_identity_providers,
    },
    SyncStep {
        name: "sync cluster role bindings",
        f: sync_cluster_role_bindings,
    },
];

/// The pipeline in execution order.
pub fn sync_steps() -> &'static [SyncStep] {
    SYNC_STEPS
}

/// Run every step in order against the connected clients.
///
/// A step returning [`SyncError::Skipped`] is logged and the run continues;
/// any other error aborts the run immediately, since later steps may depend
/// on earlier ones having succeeded.
pub async fn run_pipeline(ctx: &SyncContext) -> Result<(), SyncError> {
    for step in sync_steps() {
        info!(step = step.name, "running step");
        match step.run(ctx).await {
            Ok(()) => {}
            Err(err) if err.is_skipped() => {
                info!(step = step.name, reason = %err, "skipped");
            }
            Err(err) => {
                error!(step = step.name, error = %err, "error syncing cluster state");
                return Err(err);
            }
        }
    }

    Ok(())
}
