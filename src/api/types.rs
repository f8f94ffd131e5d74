//! Wire types for the admin API.
//!
//! The desired-state value objects decoded from the bundle are the same
//! shapes the API accepts, so the YAML entries deserialize straight into
//! request payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cluster-scoped role bindings: principal name to the set of role names
/// held on the cluster resource.
pub type RoleBindingEntries = BTreeMap<String, Vec<String>>;

/// A cluster registered with the federation server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRegistration {
    pub id: String,
    /// Control-plane address the federation server heartbeats against.
    pub address: String,
    /// User-facing address advertised to clients of the member cluster.
    #[serde(default)]
    pub user_address: String,
    /// Shared secret the member cluster authenticates with.
    /// May be an environment-variable indirection in the bundle.
    pub secret: String,
    /// May be an environment-variable indirection in the bundle.
    #[serde(default)]
    pub cluster_deployment_id: Option<String>,
    /// True when this registration is the federation server itself.
    #[serde(default)]
    pub enterprise_server: bool,
}

/// Mutable fields of a registered cluster. The shared secret is
/// intentionally absent: it cannot be rotated through the update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterUpdate {
    pub id: String,
    pub address: String,
    #[serde(default)]
    pub user_address: String,
    #[serde(default)]
    pub cluster_deployment_id: Option<String>,
}

/// A registered cluster as reported by the federation server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    pub id: String,
    pub address: String,
    #[serde(default)]
    pub user_address: String,
    #[serde(default)]
    pub cluster_deployment_id: Option<String>,
}

/// Enterprise activation config naming this cluster's federation server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseConfig {
    /// Id this cluster was registered under on the federation server.
    pub id: String,
    /// Address of the federation server issuing the license.
    pub license_server: String,
    /// May be an environment-variable indirection in the bundle.
    pub secret: String,
}

/// Enterprise activation state as reported by the control plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseState {
    pub state: String,
    #[serde(default)]
    pub expires: Option<String>,
}

/// Identity service issuer configuration. Overwritten on every apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityServerConfig {
    pub issuer: String,
}

/// An OIDC client registered with the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcClient {
    pub id: String,
    pub name: String,
    /// May be an environment-variable indirection in the bundle.
    pub secret: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    #[serde(default)]
    pub trusted_peers: Vec<String>,
}

/// An identity-provider connector registered with the identity service.
///
/// `config_version` is an optimistic-update counter owned by the control
/// plane; reconciliation always derives it from the stored connector and
/// ignores whatever the bundle carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpConnector {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Opaque connector-specific configuration, passed through verbatim.
    #[serde(default)]
    pub json_config: serde_json::Value,
    #[serde(default)]
    pub config_version: i64,
}

/// The auth service's OIDC configuration. Overwritten on every apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OidcAuthConfig {
    pub issuer: String,
    pub client_id: String,
    /// May be an environment-variable indirection in the bundle.
    pub client_secret: String,
    pub redirect_uri: String,
    /// True when the issuer is the cluster's own embedded identity service.
    #[serde(default)]
    pub localhost_issuer: bool,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// The authenticated principal reported by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmI {
    pub username: String,
    #[serde(default)]
    pub expiration: Option<String>,
}

// Request/response envelopes used by the REST client.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActivateLicenseRequest<'a> {
    pub activation_code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActivateAuthRequest<'a> {
    pub root_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ModifyRoleBindingRequest<'a> {
    pub principal: &'a str,
    pub roles: &'a [String],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListClustersResponse {
    #[serde(default)]
    pub clusters: Vec<ClusterStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListOidcClientsResponse {
    #[serde(default)]
    pub clients: Vec<OidcClient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListIdpConnectorsResponse {
    #[serde(default)]
    pub connectors: Vec<IdpConnector>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetRoleBindingResponse {
    #[serde(default)]
    pub entries: RoleBindingEntries,
}
