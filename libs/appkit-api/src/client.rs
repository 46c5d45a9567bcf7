use appkit_errors::Status;
use appkit_http::security::ERROR_BODY_PREVIEW_LIMIT;
use appkit_http::{HttpClient, Method, RequestBuilder, RequestOptions, StatusCode};
use appkit_utils::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::ApiError;

/// Entry point shared by every typed API module.
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Arc<str>,
    token: Option<SecretString>,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (scheme and host, optional path prefix).
    ///
    /// # Errors
    /// Returns `ApiError::InvalidUrl` if `base_url` is not an absolute URL.
    pub fn new(http: HttpClient, base_url: &str) -> Result<Self, ApiError> {
        let parsed = url::Url::parse(base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_owned(),
                reason: "base URL must have a host".to_owned(),
            });
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(ApiError::InvalidUrl {
                url: base_url.to_owned(),
                reason: "base URL must not carry a query or fragment".to_owned(),
            });
        }

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').into(),
            token: None,
        })
    }

    /// Attach `Authorization: Bearer <token>` to every request.
    #[must_use]
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Absolute URL for an endpoint path such as `/app/v1/help/faqs`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request to `path`.
    pub fn call(&self, method: Method, path: &str) -> ApiRequest {
        let mut inner = self.http.request(method.clone(), &self.url(path));
        if let Some(token) = &self.token {
            inner = inner.header("authorization", &format!("Bearer {}", token.expose()));
        }
        ApiRequest {
            inner,
            method,
            path: path.to_owned(),
        }
    }
}

/// A request in flight through [`ApiClient::call`].
#[must_use = "ApiRequest does nothing until .send() is called"]
pub struct ApiRequest {
    inner: RequestBuilder,
    method: Method,
    path: String,
}

impl ApiRequest {
    /// Forward `params` as the query string; `None` fields are left out.
    ///
    /// # Errors
    /// Returns `ApiError::Transport` if the params cannot be URL-encoded.
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self, ApiError> {
        self.inner = self.inner.query(params)?;
        Ok(self)
    }

    /// Send `body` as JSON.
    ///
    /// # Errors
    /// Returns `ApiError::Transport` if the body cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        self.inner = self.inner.json(body)?;
        Ok(self)
    }

    /// Caller overrides, applied after every default.
    pub fn options(mut self, options: Option<&RequestOptions>) -> Self {
        self.inner = self.inner.options(options);
        self
    }

    /// Send the request and decode the reply.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn send<R: DeserializeOwned>(self) -> Result<R, ApiError> {
        let response = self.inner.send().await.inspect_err(|e| {
            tracing::debug!(method = %self.method, path = %self.path, error = %e, "request failed");
        })?;
        let http_status = response.status();
        let body = response.bytes().await?;

        let reply = decode_reply(http_status, &body);
        if let Err(e) = &reply {
            tracing::debug!(
                method = %self.method,
                path = %self.path,
                status = http_status.as_u16(),
                error = %e,
                "API call failed"
            );
        }
        reply
    }
}

/// Decode a reply body according to its HTTP status.
///
/// A blank 2xx body decodes as `{}` so empty acknowledgements work.
fn decode_reply<R: DeserializeOwned>(http_status: StatusCode, body: &[u8]) -> Result<R, ApiError> {
    if http_status.is_success() {
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            body
        };
        return serde_json::from_slice(body).map_err(ApiError::Decode);
    }

    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) if is_status_envelope(&value) => match serde_json::from_value::<Status>(value) {
            Ok(status) => Err(ApiError::Status {
                http_status,
                status,
            }),
            Err(_) => Err(unexpected_status(http_status, body)),
        },
        _ => Err(unexpected_status(http_status, body)),
    }
}

fn is_status_envelope(value: &serde_json::Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("code") || object.contains_key("message"))
}

fn unexpected_status(http_status: StatusCode, body: &[u8]) -> ApiError {
    let preview = &body[..body.len().min(ERROR_BODY_PREVIEW_LIMIT)];
    ApiError::UnexpectedStatus {
        http_status,
        body_preview: String::from_utf8_lossy(preview).into_owned(),
    }
}
