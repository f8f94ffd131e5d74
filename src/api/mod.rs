//! # Admin API Boundary
//!
//! Abstract interface for the control plane's administrative API.
//!
//! The job is a caller, not an implementer, of this API: every sync step
//! goes through the [`AdminApi`] trait, and the REST implementation in
//! [`rest`] is the only code that knows the wire details. Tests substitute
//! an in-memory implementation.

use async_trait::async_trait;

mod error;
pub mod rest;
mod types;

pub use error::ApiError;
pub use types::*;

/// The control-plane operations the bootstrap job drives.
///
/// Every `create_*` call signals a conflicting id distinguishably via
/// [`ApiError::is_duplicate`], and the activation calls signal an
/// already-active target via [`ApiError::is_already_active`], so callers
/// never have to match on error messages.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Apply a license activation code. Naturally idempotent upstream.
    async fn activate_license(&self, activation_code: &str) -> Result<(), ApiError>;

    /// Register a cluster with the federation server.
    async fn add_cluster(&self, cluster: &ClusterRegistration) -> Result<(), ApiError>;

    /// Update a registered cluster's addresses and deployment id.
    /// The shared secret is never updated through this call.
    async fn update_cluster(&self, update: &ClusterUpdate) -> Result<(), ApiError>;

    /// List the clusters registered with the federation server.
    async fn list_clusters(&self) -> Result<Vec<ClusterStatus>, ApiError>;

    /// Point this cluster at its federation server and activate enterprise
    /// features. Overwrite semantics.
    async fn activate_enterprise(&self, config: &EnterpriseConfig) -> Result<(), ApiError>;

    /// Query the enterprise activation state.
    async fn enterprise_state(&self) -> Result<EnterpriseState, ApiError>;

    /// Activate authentication with the given root token.
    async fn activate_auth(&self, root_token: &str) -> Result<(), ApiError>;

    /// Report the principal the client is authenticated as.
    async fn who_am_i(&self) -> Result<WhoAmI, ApiError>;

    /// Tell the file-storage service to begin enforcing authentication.
    async fn activate_storage_auth(&self) -> Result<(), ApiError>;

    /// Tell the job-scheduling service to begin enforcing authentication.
    async fn activate_scheduler_auth(&self) -> Result<(), ApiError>;

    /// Overwrite the identity service's issuer configuration.
    async fn set_identity_config(&self, config: &IdentityServerConfig) -> Result<(), ApiError>;

    async fn create_oidc_client(&self, client: &OidcClient) -> Result<(), ApiError>;

    async fn update_oidc_client(&self, client: &OidcClient) -> Result<(), ApiError>;

    async fn list_oidc_clients(&self) -> Result<Vec<OidcClient>, ApiError>;

    async fn create_idp_connector(&self, connector: &IdpConnector) -> Result<(), ApiError>;

    async fn update_idp_connector(&self, connector: &IdpConnector) -> Result<(), ApiError>;

    async fn list_idp_connectors(&self) -> Result<Vec<IdpConnector>, ApiError>;

    /// Fetch the cluster-scoped role-binding map.
    async fn get_role_binding(&self) -> Result<RoleBindingEntries, ApiError>;

    /// Replace a principal's role set on the cluster resource.
    /// An empty role list clears the binding.
    async fn modify_role_binding(&self, principal: &str, roles: &[String]) -> Result<(), ApiError>;

    /// Overwrite the auth service's OIDC configuration.
    async fn set_auth_config(&self, config: &OidcAuthConfig) -> Result<(), ApiError>;
}
