use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("appkit-http/", env!("CARGO_PKG_VERSION"));

/// Where trusted TLS roots come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsRootConfig {
    /// Bundled Mozilla roots
    #[default]
    WebPki,
    /// The operating system's certificate store
    Native,
}

/// Accepted URL schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportSecurity {
    #[default]
    TlsOnly,
    /// `http://` as well. Local development and mock servers only.
    AllowInsecureHttp,
}

/// Settings consumed by [`HttpClientBuilder`](crate::HttpClientBuilder).
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request deadline, response head and body included.
    /// [`RequestOptions::timeout`](crate::RequestOptions::timeout) overrides it per call.
    pub request_timeout: Duration,
    pub max_body_size: usize,
    /// Sent unless the request sets its own `user-agent`
    pub user_agent: String,
    /// Sent unless the request sets a header of the same name
    pub default_headers: Vec<(String, String)>,
    pub transport: TransportSecurity,
    pub tls_roots: TlsRootConfig,
    /// Requests queued for the worker before new ones fail with `Overloaded`
    pub buffer_capacity: usize,
    /// `None` keeps idle connections open indefinitely
    pub pool_idle_timeout: Option<Duration>,
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_body_size: 4 * 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            default_headers: vec![("accept".to_owned(), "application/json".to_owned())],
            transport: TransportSecurity::TlsOnly,
            tls_roots: TlsRootConfig::WebPki,
            buffer_capacity: 256,
            pool_idle_timeout: Some(Duration::from_secs(60)),
            pool_max_idle_per_host: 8,
        }
    }
}
