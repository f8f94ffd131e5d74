//! Authentication activation and configuration.
//!
//! Activation is a one-way transition keyed on the presence of a root-token
//! entry. An already-active cluster reports success and the run moves on;
//! only a first activation triggers the follow-up enforcement calls to the
//! file-storage and job-scheduling services.

use crate::api::OidcAuthConfig;
use crate::config::keys;
use crate::error::SyncError;
use crate::secrets::resolve_env_ref;

use super::SyncContext;

/// Activate authentication with the bundle's root token.
pub async fn activate(ctx: &SyncContext) -> Result<(), SyncError> {
    let root_token = ctx.config.load_string(keys::ROOT_TOKEN)?;

    match ctx.cluster.activate_auth(&root_token).await {
        Ok(()) => {}
        // Already active: a previous run finished the whole transition,
        // including the enforcement calls below.
        Err(err) if err.is_already_active() => return Ok(()),
        Err(err) => return Err(err.into()),
    }

    if let Err(err) = ctx.cluster.activate_storage_auth().await {
        if !err.is_already_active() {
            return Err(err.into());
        }
    }

    if let Err(err) = ctx.cluster.activate_scheduler_auth().await {
        if !err.is_already_active() {
            return Err(err.into());
        }
    }

    Ok(())
}

/// Overwrite the auth service's OIDC configuration.
pub async fn configure(ctx: &SyncContext) -> Result<(), SyncError> {
    let mut config: OidcAuthConfig = ctx.config.load_yaml(keys::AUTH_CONFIG)?;
    config.client_secret = resolve_env_ref(&config.client_secret)?;

    ctx.cluster.set_auth_config(&config).await?;
    Ok(())
}
