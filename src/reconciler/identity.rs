//! Identity service reconciliation: issuer config, OIDC clients, and IDP
//! connectors.
//!
//! OIDC clients follow the plain create-or-update shape. IDP connectors
//! carry an optimistic-update version owned by the control plane, so the
//! step fetches the stored connectors once and reconciles each desired
//! connector against them: create at version 0, no-op when deep-equal, or
//! update with the stored version incremented by one. The bundle's own
//! version field is ignored.

use crate::api::{AdminApi, ApiError, IdentityServerConfig, IdpConnector, OidcClient};
use crate::config::keys;
use crate::error::SyncError;
use crate::secrets::resolve_env_ref;

use super::SyncContext;

/// Overwrite the identity service's issuer configuration.
pub async fn configure_service(ctx: &SyncContext) -> Result<(), SyncError> {
    let config: IdentityServerConfig = ctx.config.load_yaml(keys::IDENTITY_SERVICE_CONFIG)?;

    ctx.cluster.set_identity_config(&config).await?;
    Ok(())
}

/// Sync the OIDC client registry: create each desired client by id, fall
/// back to an update when the id already exists.
pub async fn sync_oidc_clients(ctx: &SyncContext) -> Result<(), SyncError> {
    let clients: Vec<OidcClient> = ctx.config.load_yaml(keys::OIDC_CLIENTS)?;

    for mut client in clients {
        client.secret = resolve_env_ref(&client.secret)?;

        match ctx.federation.create_oidc_client(&client).await {
            Ok(()) => {}
            Err(err) if err.is_duplicate() => {
                ctx.federation.update_oidc_client(&client).await?;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Reconcile one desired connector against the stored list.
///
/// The stored version is authoritative: it is copied into the desired value
/// before the equality check so the comparison covers content only, and an
/// update ships exactly `stored + 1`.
async fn create_or_update_connector(
    api: &dyn AdminApi,
    mut connector: IdpConnector,
    existing: &[IdpConnector],
) -> Result<(), ApiError> {
    for stored in existing {
        if stored.id == connector.id {
            connector.config_version = stored.config_version;
            if *stored == connector {
                return Ok(());
            }

            connector.config_version = stored.config_version + 1;
            return api.update_idp_connector(&connector).await;
        }
    }

    connector.config_version = 0;
    api.create_idp_connector(&connector).await
}

/// Sync the IDP connector registry.
///
/// The stored list is fetched once per step invocation, so an unchanged
/// bundle costs one list call and zero mutations.
pub async fn sync_idp_connectors(ctx: &SyncContext) -> Result<(), SyncError> {
    let connectors: Vec<IdpConnector> = ctx.config.load_yaml(keys::IDPS)?;

    let existing = ctx.federation.list_idp_connectors().await?;

    for connector in connectors {
        create_or_update_connector(ctx.federation.as_ref(), connector, &existing).await?;
    }

    Ok(())
}
