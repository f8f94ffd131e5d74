//! Control-plane admin REST client.
//!
//! Thin `reqwest` wrapper over the admin API: bearer-token auth on every
//! call, JSON bodies, and per-endpoint mapping of conflict statuses onto
//! the typed idempotence signals in [`ApiError`].

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{
    ActivateAuthRequest, ActivateLicenseRequest, AdminApi, ApiError, ClusterRegistration,
    ClusterStatus, ClusterUpdate, EnterpriseConfig, EnterpriseState, GetRoleBindingResponse,
    IdentityServerConfig, IdpConnector, ListClustersResponse, ListIdpConnectorsResponse,
    ListOidcClientsResponse, ModifyRoleBindingRequest, OidcAuthConfig, OidcClient,
    RoleBindingEntries, WhoAmI,
};

/// Error payload the control plane returns on non-2xx responses.
#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    message: String,
}

/// REST client for the control plane's admin API.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Create a client against `address`, attaching `auth_token` as a
    /// bearer token when present.
    pub fn new(address: &str, auth_token: Option<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: address.trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api/v1/{}", self.base_url, path);
        let mut req = self.http.request(method, url);
        if let Some(token) = &self.auth_token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        let resp = self.request(method, path).json(body).send().await?;
        Ok(resp)
    }

    /// Turn a non-2xx response into [`ApiError::Remote`], pulling the
    /// message out of the JSON error body when there is one.
    async fn remote_error(resp: Response) -> ApiError {
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<RemoteErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);
        ApiError::Remote { status, message }
    }

    /// Succeed on 2xx, fail with [`ApiError::Remote`] otherwise.
    async fn expect_ok(resp: Response) -> Result<(), ApiError> {
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::remote_error(resp).await)
        }
    }

    /// Succeed on 2xx, map 409 to a duplicate-id signal for `kind`/`id`.
    async fn expect_ok_or_duplicate(
        resp: Response,
        kind: &'static str,
        id: &str,
    ) -> Result<(), ApiError> {
        match resp.status() {
            s if s.is_success() => Ok(()),
            StatusCode::CONFLICT => Err(ApiError::Duplicate {
                kind,
                id: id.to_string(),
            }),
            _ => Err(Self::remote_error(resp).await),
        }
    }

    /// Succeed on 2xx, map 409 to the already-active signal.
    async fn expect_ok_or_already_active(resp: Response) -> Result<(), ApiError> {
        match resp.status() {
            s if s.is_success() => Ok(()),
            StatusCode::CONFLICT => Err(ApiError::AlreadyActive),
            _ => Err(Self::remote_error(resp).await),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.request(Method::GET, path).send().await?;
        if !resp.status().is_success() {
            return Err(Self::remote_error(resp).await);
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl AdminApi for RestClient {
    async fn activate_license(&self, activation_code: &str) -> Result<(), ApiError> {
        let resp = self
            .send_json(
                Method::POST,
                "license/activate",
                &ActivateLicenseRequest { activation_code },
            )
            .await?;
        Self::expect_ok(resp).await
    }

    async fn add_cluster(&self, cluster: &ClusterRegistration) -> Result<(), ApiError> {
        let resp = self
            .send_json(Method::POST, "license/clusters", cluster)
            .await?;
        Self::expect_ok_or_duplicate(resp, "cluster", &cluster.id).await
    }

    async fn update_cluster(&self, update: &ClusterUpdate) -> Result<(), ApiError> {
        let path = format!("license/clusters/{}", update.id);
        let resp = self.send_json(Method::PATCH, &path, update).await?;
        Self::expect_ok(resp).await
    }

    async fn list_clusters(&self) -> Result<Vec<ClusterStatus>, ApiError> {
        let resp: ListClustersResponse = self.get_json("license/clusters").await?;
        Ok(resp.clusters)
    }

    async fn activate_enterprise(&self, config: &EnterpriseConfig) -> Result<(), ApiError> {
        let resp = self
            .send_json(Method::POST, "enterprise/activate", config)
            .await?;
        Self::expect_ok(resp).await
    }

    async fn enterprise_state(&self) -> Result<EnterpriseState, ApiError> {
        self.get_json("enterprise/state").await
    }

    async fn activate_auth(&self, root_token: &str) -> Result<(), ApiError> {
        let resp = self
            .send_json(
                Method::POST,
                "auth/activate",
                &ActivateAuthRequest { root_token },
            )
            .await?;
        Self::expect_ok_or_already_active(resp).await
    }

    async fn who_am_i(&self) -> Result<WhoAmI, ApiError> {
        self.get_json("auth/whoami").await
    }

    async fn activate_storage_auth(&self) -> Result<(), ApiError> {
        let resp = self
            .request(Method::POST, "storage/auth/activate")
            .send()
            .await?;
        Self::expect_ok_or_already_active(resp).await
    }

    async fn activate_scheduler_auth(&self) -> Result<(), ApiError> {
        let resp = self
            .request(Method::POST, "scheduler/auth/activate")
            .send()
            .await?;
        Self::expect_ok_or_already_active(resp).await
    }

    async fn set_identity_config(&self, config: &IdentityServerConfig) -> Result<(), ApiError> {
        let resp = self.send_json(Method::PUT, "identity/config", config).await?;
        Self::expect_ok(resp).await
    }

    async fn create_oidc_client(&self, client: &OidcClient) -> Result<(), ApiError> {
        let resp = self
            .send_json(Method::POST, "identity/oidc/clients", client)
            .await?;
        Self::expect_ok_or_duplicate(resp, "oidc client", &client.id).await
    }

    async fn update_oidc_client(&self, client: &OidcClient) -> Result<(), ApiError> {
        let path = format!("identity/oidc/clients/{}", client.id);
        let resp = self.send_json(Method::PUT, &path, client).await?;
        Self::expect_ok(resp).await
    }

    async fn list_oidc_clients(&self) -> Result<Vec<OidcClient>, ApiError> {
        let resp: ListOidcClientsResponse = self.get_json("identity/oidc/clients").await?;
        Ok(resp.clients)
    }

    async fn create_idp_connector(&self, connector: &IdpConnector) -> Result<(), ApiError> {
        let resp = self
            .send_json(Method::POST, "identity/idp/connectors", connector)
            .await?;
        Self::expect_ok_or_duplicate(resp, "idp connector", &connector.id).await
    }

    async fn update_idp_connector(&self, connector: &IdpConnector) -> Result<(), ApiError> {
        let path = format!("identity/idp/connectors/{}", connector.id);
        let resp = self.send_json(Method::PUT, &path, connector).await?;
        Self::expect_ok(resp).await
    }

    async fn list_idp_connectors(&self) -> Result<Vec<IdpConnector>, ApiError> {
        let resp: ListIdpConnectorsResponse = self.get_json("identity/idp/connectors").await?;
        Ok(resp.connectors)
    }

    async fn get_role_binding(&self) -> Result<RoleBindingEntries, ApiError> {
        let resp: GetRoleBindingResponse = self.get_json("auth/role-bindings/cluster").await?;
        Ok(resp.entries)
    }

    async fn modify_role_binding(&self, principal: &str, roles: &[String]) -> Result<(), ApiError> {
        // Principal names carry prefixes like `robot:`, so they travel in
        // the body rather than the path.
        let resp = self
            .send_json(
                Method::PUT,
                "auth/role-bindings/cluster",
                &ModifyRoleBindingRequest { principal, roles },
            )
            .await?;
        Self::expect_ok(resp).await
    }

    async fn set_auth_config(&self, config: &OidcAuthConfig) -> Result<(), ApiError> {
        let resp = self.send_json(Method::PUT, "auth/config", config).await?;
        Self::expect_ok(resp).await
    }
}
