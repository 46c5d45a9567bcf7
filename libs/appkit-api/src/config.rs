use std::time::Duration;

use appkit_http::{HttpClient, TransportSecurity};
use appkit_utils::SecretString;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Connection settings for the `AppKit` backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Scheme, host and optional path prefix, e.g. `https://api.example.com`
    pub base_url: String,
    /// Bearer token sent as `Authorization: Bearer <token>`
    pub token: Option<SecretString>,
    /// Per-request timeout (humantime, e.g. `"30s"`)
    #[serde(with = "appkit_utils::humantime_serde")]
    pub timeout: Duration,
    /// Overrides the transport's default User-Agent
    pub user_agent: Option<String>,
    /// Accept plain `http://` base URLs. Local development only.
    pub allow_insecure_http: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:8000".to_owned(),
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: None,
            allow_insecure_http: false,
        }
    }
}

impl ApiConfig {
    /// Build the HTTP transport and wrap it in an [`ApiClient`].
    ///
    /// Must be called inside a Tokio runtime. An empty token is treated as no token.
    ///
    /// # Errors
    /// Returns `ApiError::Transport` if the HTTP client cannot be built and
    /// `ApiError::InvalidUrl` if `base_url` is not usable.
    pub fn build_client(&self) -> Result<ApiClient, ApiError> {
        let mut builder = HttpClient::builder().timeout(self.timeout);
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if self.allow_insecure_http {
            tracing::warn!(base_url = %self.base_url, "plain HTTP allowed for API calls");
            builder = builder.transport(TransportSecurity::AllowInsecureHttp);
        }

        let client = ApiClient::new(builder.build()?, &self.base_url)?;
        Ok(match &self.token {
            Some(token) if !token.is_empty() => client.with_token(token.clone()),
            _ => client,
        })
    }
}
