//! Enterprise federation reconciliation.
//!
//! Two topologies converge through the same add-or-update path:
//!
//! - **Embedded**: the cluster doubles as its own federation server. A
//!   single shared-secret entry synthesizes the one-cluster registration
//!   and activation config.
//! - **External**: the bundle carries an explicit cluster list and an
//!   activation config naming one of them as the federation server.
//!
//! The two steps consult different bundle keys and neither skips when the
//! other fired; a bundle carrying both runs both.

use crate::api::{AdminApi, ClusterRegistration, ClusterUpdate, EnterpriseConfig};
use crate::config::keys;
use crate::constants::{EMBEDDED_FEDERATION_ADDRESS, EMBEDDED_FEDERATION_ID};
use crate::error::SyncError;
use crate::secrets::{resolve_env_ref, resolve_optional_env_ref};

use super::SyncContext;

/// Registration for the embedded topology, where the cluster reaches its
/// federation server over loopback.
fn embedded_cluster(secret: &str) -> ClusterRegistration {
    ClusterRegistration {
        id: EMBEDDED_FEDERATION_ID.to_string(),
        address: EMBEDDED_FEDERATION_ADDRESS.to_string(),
        user_address: EMBEDDED_FEDERATION_ADDRESS.to_string(),
        secret: secret.to_string(),
        cluster_deployment_id: None,
        enterprise_server: true,
    }
}

fn embedded_config(secret: &str) -> EnterpriseConfig {
    EnterpriseConfig {
        id: EMBEDDED_FEDERATION_ID.to_string(),
        license_server: EMBEDDED_FEDERATION_ADDRESS.to_string(),
        secret: secret.to_string(),
    }
}

/// Register and activate the embedded federation server from a single
/// shared-secret entry.
pub async fn embedded_server(ctx: &SyncContext) -> Result<(), SyncError> {
    let secret = ctx.config.load_string(keys::ENTERPRISE_SECRET)?;

    let cluster = embedded_cluster(&secret);
    if let Err(err) = ctx.federation.add_cluster(&cluster).await {
        if !err.is_duplicate() {
            return Err(err.into());
        }
    }

    ctx.federation
        .activate_enterprise(&embedded_config(&secret))
        .await?;
    Ok(())
}

/// Converge one desired registration: create by id, fall back to an update
/// of the mutable fields when the id is already registered.
async fn add_or_update_cluster(
    api: &dyn AdminApi,
    cluster: &ClusterRegistration,
) -> Result<(), SyncError> {
    match api.add_cluster(cluster).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_duplicate() => {
            api.update_cluster(&ClusterUpdate {
                id: cluster.id.clone(),
                address: cluster.address.clone(),
                user_address: cluster.user_address.clone(),
                cluster_deployment_id: cluster.cluster_deployment_id.clone(),
            })
            .await?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Sync the explicit federation cluster list against the federation server.
pub async fn sync_clusters(ctx: &SyncContext) -> Result<(), SyncError> {
    let clusters: Vec<ClusterRegistration> = ctx.config.load_yaml(keys::ENTERPRISE_CLUSTERS)?;

    for mut cluster in clusters {
        cluster.secret = resolve_env_ref(&cluster.secret)?;
        cluster.cluster_deployment_id = resolve_optional_env_ref(cluster.cluster_deployment_id)?;

        add_or_update_cluster(ctx.federation.as_ref(), &cluster).await?;
    }

    Ok(())
}

/// Activate enterprise features on the cluster being bootstrapped, pointing
/// it at its federation server.
pub async fn activate(ctx: &SyncContext) -> Result<(), SyncError> {
    let mut config: EnterpriseConfig = ctx.config.load_yaml(keys::ENTERPRISE_CONFIG)?;
    config.secret = resolve_env_ref(&config.secret)?;

    ctx.cluster.activate_enterprise(&config).await?;
    Ok(())
}
