//! Cluster role-binding reconciliation.
//!
//! The bundle carries the complete desired mapping of principal to role
//! set. Existing principals absent from it are cleared, except `system:`
//! principals, which belong to the control plane and are never touched.
//! Every desired principal is then written in full; the diff is
//! presence-level only.

use std::collections::BTreeMap;

use crate::api::RoleBindingEntries;
use crate::config::keys;
use crate::constants::SYSTEM_PRINCIPAL_PREFIX;
use crate::error::SyncError;

use super::SyncContext;

/// Principals to clear: present remotely, absent from the desired map, and
/// not in the reserved namespace.
fn principals_to_clear(existing: &RoleBindingEntries, desired: &RoleBindingEntries) -> Vec<String> {
    existing
        .keys()
        .filter(|principal| !principal.starts_with(SYSTEM_PRINCIPAL_PREFIX))
        .filter(|principal| !desired.contains_key(*principal))
        .cloned()
        .collect()
}

pub async fn sync_role_bindings(ctx: &SyncContext) -> Result<(), SyncError> {
    let desired: BTreeMap<String, Vec<String>> =
        ctx.config.load_yaml(keys::CLUSTER_ROLE_BINDINGS)?;

    let existing = ctx.cluster.get_role_binding().await?;

    for principal in principals_to_clear(&existing, &desired) {
        ctx.cluster.modify_role_binding(&principal, &[]).await?;
    }

    for (principal, roles) in &desired {
        ctx.cluster.modify_role_binding(principal, roles).await?;
    }

    Ok(())
}
