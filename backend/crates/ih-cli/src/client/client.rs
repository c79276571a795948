use crate::{CliClientResult, ClientError};

use ih_core::{Role, SyncProfile};

use reqwest::{Client as ReqwestClient, Method};
use serde::Serialize;
use serde_json::Value;

/// HTTP client for the ih-server REST API
pub struct Client {
    pub base_url: String,
    pub user_id: Option<String>,
    pub token: Option<String>,
    client: ReqwestClient,
}

impl Client {
    /// # Arguments
    /// * `base_url` - Server URL (e.g., "http://127.0.0.1:8000")
    /// * `user_id` - Caller identity for servers running without token verification
    /// * `token` - Bearer token; takes precedence over `user_id`
    pub fn new(base_url: &str, user_id: Option<&str>, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.map(String::from),
            token: token.map(String::from),
            client: ReqwestClient::new(),
        }
    }

    /// Build a request carrying the caller identity, if any
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.client.request(method, &url);

        match (&self.token, &self.user_id) {
            (Some(token), _) => req.bearer_auth(token),
            (None, Some(user_id)) => req.header("X-User-Id", user_id),
            (None, None) => req,
        }
    }

    /// Execute request and turn error bodies into `ClientError::Api`
    async fn execute(&self, req: reqwest::RequestBuilder) -> CliClientResult<Value> {
        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;

        if !status.is_success() {
            let error = body.get("error");
            let code = error
                .and_then(|e| e.get("code"))
                .and_then(|v| v.as_str())
                .unwrap_or("UNKNOWN")
                .to_string();
            let message = error
                .and_then(|e| e.get("message"))
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            return Err(ClientError::api_error(code, message));
        }

        Ok(body)
    }

    // =========================================================================
    // User Operations
    // =========================================================================

    /// Insert-if-absent
    pub async fn sync_user(&self, profile: &SyncProfile) -> CliClientResult<Value> {
        let req = self
            .request(Method::POST, "/api/v1/users/sync")
            .json(profile);
        self.execute(req).await
    }

    pub async fn assign_role(&self, external_id: &str, role: Role) -> CliClientResult<Value> {
        #[derive(Serialize)]
        struct AssignRoleRequest<'a> {
            role: &'a str,
        }

        let req = self
            .request(Method::PUT, &format!("/api/v1/users/{}/role", external_id))
            .json(&AssignRoleRequest {
                role: role.as_str(),
            });
        self.execute(req).await
    }

    pub async fn refresh_profile(&self, profile: &SyncProfile) -> CliClientResult<Value> {
        let req = self
            .request(
                Method::PUT,
                &format!("/api/v1/users/{}/profile", profile.external_identity_id),
            )
            .json(profile);
        self.execute(req).await
    }

    pub async fn list_users(&self) -> CliClientResult<Value> {
        let req = self.request(Method::GET, "/api/v1/users");
        self.execute(req).await
    }

    /// `{"user": null}` when the identity has no record
    pub async fn get_user(&self, external_id: &str) -> CliClientResult<Value> {
        let req = self.request(Method::GET, &format!("/api/v1/users/{}", external_id));
        self.execute(req).await
    }
}
