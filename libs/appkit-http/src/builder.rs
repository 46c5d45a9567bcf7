use std::time::Duration;

use bytes::Bytes;
use http::Response;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use tower::buffer::Buffer;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::decompression::DecompressionLayer;

use crate::client::{BufferedService, HttpClient};
use crate::config::{HttpClientConfig, TlsRootConfig, TransportSecurity};
use crate::error::HttpError;
use crate::layers::DefaultHeadersLayer;
use crate::response::ResponseBody;
use crate::tls;

/// Assembles an [`HttpClient`].
///
/// ```ignore
/// let client = HttpClient::builder()
///     .timeout(Duration::from_secs(5))
///     .user_agent("my-app/1.0")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete config (pool and buffer tuning included).
    #[must_use]
    pub fn with_config(config: HttpClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Add or replace (case-insensitively) a default header.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.config
            .default_headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.config.default_headers.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.config.max_body_size = bytes;
        self
    }

    #[must_use]
    pub fn transport(mut self, transport: TransportSecurity) -> Self {
        self.config.transport = transport;
        self
    }

    /// Shorthand for `transport(TransportSecurity::AllowInsecureHttp)` in
    /// debug builds and under the `allow-insecure-http` feature.
    #[must_use]
    #[cfg(any(debug_assertions, feature = "allow-insecure-http"))]
    pub fn allow_insecure_http(self) -> Self {
        self.transport(TransportSecurity::AllowInsecureHttp)
    }

    #[must_use]
    pub fn tls_roots(mut self, roots: TlsRootConfig) -> Self {
        self.config.tls_roots = roots;
        self
    }

    /// Build the client. Call from inside a Tokio runtime; the buffer worker
    /// is spawned here.
    ///
    /// # Errors
    /// `HttpError::Tls` if the TLS stack cannot be set up, a header error if
    /// the user agent or a default header is not a valid header.
    pub fn build(self) -> Result<HttpClient, HttpError> {
        let config = self.config;
        if config.transport == TransportSecurity::AllowInsecureHttp {
            tracing::warn!(
                target: "appkit_http::security",
                "plain HTTP enabled, traffic will not be encrypted"
            );
        }

        let mut pool = Client::builder(TokioExecutor::new());
        pool.pool_timer(TokioTimer::new())
            .pool_max_idle_per_host(config.pool_max_idle_per_host);
        if let Some(idle) = config.pool_idle_timeout {
            pool.pool_idle_timeout(idle);
        }
        let hyper_client =
            pool.build::<_, Full<Bytes>>(https_connector(config.tls_roots, config.transport)?);

        // outermost first: defaults, then gzip/br/deflate, then the wire
        let stack = ServiceBuilder::new()
            .layer(DefaultHeadersLayer::try_new(
                &config.user_agent,
                &config.default_headers,
            )?)
            .layer(DecompressionLayer::new())
            .service(hyper_client)
            .map_response(box_body)
            .map_err(HttpError::from)
            .boxed_clone();
        let service: BufferedService = Buffer::new(stack, config.buffer_capacity.max(1));

        Ok(HttpClient {
            service,
            max_body_size: config.max_body_size,
            transport_security: config.transport,
            request_timeout: config.request_timeout,
        })
    }
}

fn box_body<B>(response: Response<B>) -> Response<ResponseBody>
where
    B: hyper::body::Body<Data = Bytes> + Send + Sync + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    response.map(|body| body.map_err(Into::into).boxed())
}

fn https_connector(
    roots: TlsRootConfig,
    transport: TransportSecurity,
) -> Result<HttpsConnector<HttpConnector>, HttpError> {
    let with_roots = match roots {
        TlsRootConfig::WebPki => HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(tls::get_crypto_provider())
            .map_err(|e| HttpError::Tls(Box::new(e)))?,
        TlsRootConfig::Native => HttpsConnectorBuilder::new()
            .with_tls_config(tls::native_roots_client_config().map_err(|e| HttpError::Tls(e.into()))?),
    };

    Ok(match transport {
        TransportSecurity::TlsOnly => with_roots.https_only().enable_all_versions().build(),
        TransportSecurity::AllowInsecureHttp => {
            with_roots.https_or_http().enable_all_versions().build()
        }
    })
}
