//! Shared test fixtures: an in-memory control plane implementing the admin
//! API, and a bundle builder writing entries into a temp config root.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use cluster_bootstrap::api::{
    AdminApi, ApiError, ClusterRegistration, ClusterStatus, ClusterUpdate, EnterpriseConfig,
    EnterpriseState, IdentityServerConfig, IdpConnector, OidcAuthConfig, OidcClient,
    RoleBindingEntries, WhoAmI,
};
use cluster_bootstrap::config::ConfigSource;
use cluster_bootstrap::constants::ROOT_PRINCIPAL;
use cluster_bootstrap::reconciler::SyncContext;

/// Remote state held by the mock control plane, plus an ordered log of the
/// mutating calls it served.
#[derive(Debug, Default)]
pub struct MockState {
    pub license: Option<String>,
    pub clusters: BTreeMap<String, ClusterRegistration>,
    pub enterprise: Option<EnterpriseConfig>,
    pub auth_active: bool,
    pub storage_auth_active: bool,
    pub scheduler_auth_active: bool,
    pub identity_config: Option<IdentityServerConfig>,
    pub oidc_clients: BTreeMap<String, OidcClient>,
    pub idp_connectors: BTreeMap<String, IdpConnector>,
    pub role_bindings: RoleBindingEntries,
    pub auth_config: Option<OidcAuthConfig>,
    pub calls: Vec<&'static str>,
}

/// Everything the pipeline can converge, for before/after comparisons.
pub type Snapshot = (
    Option<String>,
    BTreeMap<String, ClusterRegistration>,
    Option<EnterpriseConfig>,
    Option<IdentityServerConfig>,
    BTreeMap<String, OidcClient>,
    BTreeMap<String, IdpConnector>,
    RoleBindingEntries,
    Option<OidcAuthConfig>,
);

impl MockState {
    pub fn snapshot(&self) -> Snapshot {
        (
            self.license.clone(),
            self.clusters.clone(),
            self.enterprise.clone(),
            self.identity_config.clone(),
            self.oidc_clients.clone(),
            self.idp_connectors.clone(),
            self.role_bindings.clone(),
            self.auth_config.clone(),
        )
    }
}

#[derive(Debug, Default)]
pub struct MockAdminApi {
    state: Mutex<MockState>,
}

impl MockAdminApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state lock")
    }

    /// How many times the named mutating call was served.
    pub fn call_count(&self, op: &str) -> usize {
        self.state().calls.iter().filter(|c| **c == op).count()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    fn not_found(kind: &str, id: &str) -> ApiError {
        ApiError::Remote {
            status: 404,
            message: format!("{kind} {id:?} not found"),
        }
    }
}

#[async_trait]
impl AdminApi for MockAdminApi {
    async fn activate_license(&self, activation_code: &str) -> Result<(), ApiError> {
        let mut state = self.state();
        state.license = Some(activation_code.to_string());
        state.calls.push("activate_license");
        Ok(())
    }

    async fn add_cluster(&self, cluster: &ClusterRegistration) -> Result<(), ApiError> {
        let mut state = self.state();
        if state.clusters.contains_key(&cluster.id) {
            return Err(ApiError::Duplicate {
                kind: "cluster",
                id: cluster.id.clone(),
            });
        }
        state.clusters.insert(cluster.id.clone(), cluster.clone());
        state.calls.push("add_cluster");
        Ok(())
    }

    async fn update_cluster(&self, update: &ClusterUpdate) -> Result<(), ApiError> {
        let mut state = self.state();
        let stored = state
            .clusters
            .get_mut(&update.id)
            .ok_or_else(|| Self::not_found("cluster", &update.id))?;
        stored.address = update.address.clone();
        stored.user_address = update.user_address.clone();
        stored.cluster_deployment_id = update.cluster_deployment_id.clone();
        state.calls.push("update_cluster");
        Ok(())
    }

    async fn list_clusters(&self) -> Result<Vec<ClusterStatus>, ApiError> {
        let state = self.state();
        Ok(state
            .clusters
            .values()
            .map(|c| ClusterStatus {
                id: c.id.clone(),
                address: c.address.clone(),
                user_address: c.user_address.clone(),
                cluster_deployment_id: c.cluster_deployment_id.clone(),
            })
            .collect())
    }

    async fn activate_enterprise(&self, config: &EnterpriseConfig) -> Result<(), ApiError> {
        let mut state = self.state();
        state.enterprise = Some(config.clone());
        state.calls.push("activate_enterprise");
        Ok(())
    }

    async fn enterprise_state(&self) -> Result<EnterpriseState, ApiError> {
        let state = self.state();
        let value = if state.enterprise.is_some() {
            "ACTIVE"
        } else {
            "NONE"
        };
        Ok(EnterpriseState {
            state: value.to_string(),
            expires: None,
        })
    }

    async fn activate_auth(&self, _root_token: &str) -> Result<(), ApiError> {
        let mut state = self.state();
        if state.auth_active {
            return Err(ApiError::AlreadyActive);
        }
        state.auth_active = true;
        // Activation grants the root principal its built-in binding.
        state
            .role_bindings
            .insert(ROOT_PRINCIPAL.to_string(), vec!["clusterAdmin".to_string()]);
        state.calls.push("activate_auth");
        Ok(())
    }

    async fn who_am_i(&self) -> Result<WhoAmI, ApiError> {
        let state = self.state();
        if !state.auth_active {
            return Err(ApiError::Remote {
                status: 401,
                message: "auth is not activated".to_string(),
            });
        }
        Ok(WhoAmI {
            username: ROOT_PRINCIPAL.to_string(),
            expiration: None,
        })
    }

    async fn activate_storage_auth(&self) -> Result<(), ApiError> {
        let mut state = self.state();
        if state.storage_auth_active {
            return Err(ApiError::AlreadyActive);
        }
        state.storage_auth_active = true;
        state.calls.push("activate_storage_auth");
        Ok(())
    }

    async fn activate_scheduler_auth(&self) -> Result<(), ApiError> {
        let mut state = self.state();
        if state.scheduler_auth_active {
            return Err(ApiError::AlreadyActive);
        }
        state.scheduler_auth_active = true;
        state.calls.push("activate_scheduler_auth");
        Ok(())
    }

    async fn set_identity_config(&self, config: &IdentityServerConfig) -> Result<(), ApiError> {
        let mut state = self.state();
        state.identity_config = Some(config.clone());
        state.calls.push("set_identity_config");
        Ok(())
    }

    async fn create_oidc_client(&self, client: &OidcClient) -> Result<(), ApiError> {
        let mut state = self.state();
        if state.oidc_clients.contains_key(&client.id) {
            return Err(ApiError::Duplicate {
                kind: "oidc client",
                id: client.id.clone(),
            });
        }
        state.oidc_clients.insert(client.id.clone(), client.clone());
        state.calls.push("create_oidc_client");
        Ok(())
    }

    async fn update_oidc_client(&self, client: &OidcClient) -> Result<(), ApiError> {
        let mut state = self.state();
        if !state.oidc_clients.contains_key(&client.id) {
            return Err(Self::not_found("oidc client", &client.id));
        }
        state.oidc_clients.insert(client.id.clone(), client.clone());
        state.calls.push("update_oidc_client");
        Ok(())
    }

    async fn list_oidc_clients(&self) -> Result<Vec<OidcClient>, ApiError> {
        Ok(self.state().oidc_clients.values().cloned().collect())
    }

    async fn create_idp_connector(&self, connector: &IdpConnector) -> Result<(), ApiError> {
        let mut state = self.state();
        if state.idp_connectors.contains_key(&connector.id) {
            return Err(ApiError::Duplicate {
                kind: "idp connector",
                id: connector.id.clone(),
            });
        }
        state
            .idp_connectors
            .insert(connector.id.clone(), connector.clone());
        state.calls.push("create_idp_connector");
        Ok(())
    }

    async fn update_idp_connector(&self, connector: &IdpConnector) -> Result<(), ApiError> {
        let mut state = self.state();
        if !state.idp_connectors.contains_key(&connector.id) {
            return Err(Self::not_found("idp connector", &connector.id));
        }
        state
            .idp_connectors
            .insert(connector.id.clone(), connector.clone());
        state.calls.push("update_idp_connector");
        Ok(())
    }

    async fn list_idp_connectors(&self) -> Result<Vec<IdpConnector>, ApiError> {
        Ok(self.state().idp_connectors.values().cloned().collect())
    }

    async fn get_role_binding(&self) -> Result<RoleBindingEntries, ApiError> {
        Ok(self.state().role_bindings.clone())
    }

    async fn modify_role_binding(&self, principal: &str, roles: &[String]) -> Result<(), ApiError> {
        let mut state = self.state();
        if roles.is_empty() {
            state.role_bindings.remove(principal);
        } else {
            state
                .role_bindings
                .insert(principal.to_string(), roles.to_vec());
        }
        state.calls.push("modify_role_binding");
        Ok(())
    }

    async fn set_auth_config(&self, config: &OidcAuthConfig) -> Result<(), ApiError> {
        let mut state = self.state();
        state.auth_config = Some(config.clone());
        state.calls.push("set_auth_config");
        Ok(())
    }
}

/// A configuration bundle under a temp directory, written entry by entry
/// the way the mounted secret delivers them.
#[derive(Debug)]
pub struct Bundle {
    dir: tempfile::TempDir,
}

impl Bundle {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("bundle tempdir"),
        }
    }

    pub fn write(&self, key: &str, data: &str) {
        std::fs::write(self.dir.path().join(key), data).expect("write bundle entry");
    }

    pub fn write_yaml<T: serde::Serialize>(&self, key: &str, value: &T) {
        let yaml = serde_yaml::to_string(value).expect("serialize bundle entry");
        self.write(key, &yaml);
    }

    pub fn config(&self) -> ConfigSource {
        ConfigSource::new(self.dir.path())
    }

    /// Context where the mock serves as both the cluster and the
    /// federation server, as in the embedded topology.
    pub fn context(&self, api: &Arc<MockAdminApi>) -> SyncContext {
        let handle: Arc<dyn AdminApi> = Arc::clone(api) as Arc<dyn AdminApi>;
        SyncContext::new(self.config(), Arc::clone(&handle), handle)
    }
}
