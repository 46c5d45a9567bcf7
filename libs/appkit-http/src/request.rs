use std::time::Duration;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::{Method, Request, Uri};
use http_body_util::Full;
use serde::Serialize;
use tower::Service;

use crate::client::{BufferedService, map_buffer_error, try_acquire_buffer_slot};
use crate::config::TransportSecurity;
use crate::error::{HttpError, InvalidUriKind};
use crate::options::RequestOptions;
use crate::response::HttpResponse;
use crate::security::is_sensitive_header;

#[derive(Clone, Debug)]
enum Payload {
    None,
    Raw(Bytes),
    /// defaults `content-type` to `application/json`
    Json(Bytes),
}

/// One outgoing request, built fluently and sent with [`send`](Self::send).
///
/// A header set twice keeps the last value. Invalid input is remembered and
/// reported by `send`, or earlier by the fallible `query`/`json`. Call
/// [`options`](Self::options) last so the caller's headers win.
///
/// ```ignore
/// let reply: SubmitFeedbackReply = client
///     .post("https://api.example.com/app/v1/help/feedback")
///     .json(&feedback)?
///     .options(Some(&RequestOptions::new().bearer_token("t0k3n")))
///     .send()
///     .await?
///     .json()
///     .await?;
/// ```
#[must_use = "nothing is sent until .send() is awaited"]
pub struct RequestBuilder {
    service: BufferedService,
    method: Method,
    url: String,
    query: Option<String>,
    headers: HeaderMap,
    payload: Payload,
    deferred: Option<HttpError>,
    transport: TransportSecurity,
    timeout: Duration,
    body_limit: usize,
}

impl RequestBuilder {
    pub(crate) fn new(
        service: BufferedService,
        body_limit: usize,
        method: Method,
        url: String,
        transport: TransportSecurity,
        timeout: Duration,
    ) -> Self {
        Self {
            service,
            method,
            url,
            query: None,
            headers: HeaderMap::new(),
            payload: Payload::None,
            deferred: None,
            transport,
            timeout,
            body_limit,
        }
    }

    /// Set `name`, replacing an earlier value. Credentials are marked
    /// sensitive so they stay out of debug output.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if self.deferred.is_some() {
            return self;
        }
        let parsed = HeaderName::from_bytes(name.as_bytes())
            .map_err(HttpError::from)
            .and_then(|name| Ok((name, HeaderValue::from_str(value)?)));
        match parsed {
            Ok((name, mut value)) => {
                value.set_sensitive(is_sensitive_header(name.as_str()));
                self.headers.insert(name, value);
            }
            Err(err) => self.deferred = Some(err),
        }
        self
    }

    pub fn headers<'a, I>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        headers
            .into_iter()
            .fold(self, |builder, (name, value)| builder.header(name, value))
    }

    /// Append `params` to the query string. Fields that serialize to nothing
    /// are left out of the URL.
    ///
    /// # Errors
    /// A deferred builder error, or `HttpError::QueryEncode` when `params`
    /// is not a flat struct or map.
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self, HttpError> {
        self.fail_fast()?;
        let encoded = serde_urlencoded::to_string(params)?;
        if !encoded.is_empty() {
            self.query = Some(match self.query.take() {
                Some(prev) => format!("{prev}&{encoded}"),
                None => encoded,
            });
        }
        Ok(self)
    }

    /// # Errors
    /// A deferred builder error, or `HttpError::Json`.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, HttpError> {
        self.fail_fast()?;
        self.payload = Payload::Json(serde_json::to_vec(body)?.into());
        Ok(self)
    }

    pub fn body_bytes(mut self, body: Bytes) -> Self {
        self.payload = Payload::Raw(body);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Merge per-call overrides: headers replace same-named ones set so far,
    /// a timeout replaces the current one.
    pub fn options(self, options: Option<&RequestOptions>) -> Self {
        let Some(options) = options else {
            return self;
        };
        let mut builder = options
            .headers()
            .iter()
            .fold(self, |builder, (name, value)| builder.header(name, value));
        if let Some(timeout) = options.timeout_override() {
            builder.timeout = timeout;
        }
        builder
    }

    fn fail_fast(&mut self) -> Result<(), HttpError> {
        self.deferred.take().map_or(Ok(()), Err)
    }

    fn target(&self) -> Result<Uri, HttpError> {
        let url = match &self.query {
            Some(query) => {
                let sep = if self.url.contains('?') { '&' } else { '?' };
                format!("{}{sep}{query}", self.url)
            }
            None => self.url.clone(),
        };
        let bad_uri = |kind, reason: String| HttpError::InvalidUri {
            url: url.clone(),
            kind,
            reason,
        };

        let uri: Uri = url
            .parse()
            .map_err(|e: http::uri::InvalidUri| bad_uri(InvalidUriKind::ParseError, e.to_string()))?;
        if uri.authority().is_none() {
            return Err(bad_uri(InvalidUriKind::MissingAuthority, "no host".to_owned()));
        }
        let Some(scheme) = uri.scheme_str() else {
            return Err(bad_uri(InvalidUriKind::MissingScheme, "no scheme".to_owned()));
        };
        match (scheme, self.transport) {
            ("https", _) | ("http", TransportSecurity::AllowInsecureHttp) => Ok(uri),
            ("http", TransportSecurity::TlsOnly) => Err(HttpError::InvalidScheme {
                scheme: scheme.to_owned(),
                reason: "plain HTTP is disabled for this client".to_owned(),
            }),
            _ => Err(HttpError::InvalidScheme {
                scheme: scheme.to_owned(),
                reason: "expected http or https".to_owned(),
            }),
        }
    }

    /// Send and wait for the response head.
    ///
    /// Every status comes back as `Ok`; the checked readers on
    /// [`HttpResponse`] turn non-2xx into errors.
    ///
    /// # Errors
    /// A deferred builder error, a rejected URL, `Overloaded` when the
    /// buffer is full, `Timeout`, or a transport failure.
    pub async fn send(mut self) -> Result<HttpResponse, HttpError> {
        self.fail_fast()?;
        let uri = self.target()?;

        let body = match self.payload {
            Payload::None => Bytes::new(),
            Payload::Raw(bytes) => bytes,
            Payload::Json(bytes) => {
                self.headers
                    .entry(CONTENT_TYPE)
                    .or_insert(HeaderValue::from_static("application/json"));
                bytes
            }
        };

        tracing::debug!(method = %self.method, path = uri.path(), headers = ?self.headers, "http request");

        let mut request = Request::builder()
            .method(self.method)
            .uri(uri)
            .body(Full::new(body))?;
        *request.headers_mut() = self.headers;

        try_acquire_buffer_slot(&mut self.service).await?;
        let timeout = self.timeout;
        let response = tokio::time::timeout(timeout, self.service.call(request))
            .await
            .map_err(|_| HttpError::Timeout(timeout))?
            .map_err(map_buffer_error)?;

        tracing::debug!(status = %response.status(), "http response");
        Ok(HttpResponse {
            inner: response,
            max_body_size: self.body_limit,
        })
    }
}
