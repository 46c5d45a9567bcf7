use std::time::Duration;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a URL was rejected, for matching without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidUriKind {
    /// Not a URL at all
    ParseError,
    /// No host, e.g. a relative path
    MissingAuthority,
    /// No `http`/`https` scheme
    MissingScheme,
}

/// Failure of a single HTTP exchange
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HttpError {
    #[error("cannot build request: {0}")]
    RequestBuild(#[from] http::Error),

    #[error("bad header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("bad header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// No complete response within the request timeout
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// Connection refused, reset, DNS failure, ...
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    #[error("TLS setup failed: {0}")]
    Tls(#[source] BoxError),

    #[error("body of {actual} bytes exceeds the {limit} byte limit")]
    BodyTooLarge { limit: usize, actual: usize },

    /// Raised by [`HttpResponse::error_for_status`](crate::HttpResponse::error_for_status)
    /// and the checked body readers; the plain readers never produce it.
    #[error("HTTP {status}: {body_preview}")]
    HttpStatus {
        status: http::StatusCode,
        body_preview: String,
        content_type: Option<String>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot encode query string: {0}")]
    QueryEncode(#[from] serde_urlencoded::ser::Error),

    /// Every buffer slot is taken; the request was not queued
    #[error("client overloaded, request rejected")]
    Overloaded,

    /// The background worker behind the buffer has stopped
    #[error("client worker stopped")]
    ServiceClosed,

    /// `reason` is for humans; match on `kind`
    #[error("bad URL '{url}': {reason}")]
    InvalidUri {
        url: String,
        kind: InvalidUriKind,
        reason: String,
    },

    #[error("scheme '{scheme}' rejected: {reason}")]
    InvalidScheme { scheme: String, reason: String },
}

impl HttpError {
    /// The exchange failed before a response arrived.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Transport(_)
                | Self::Tls(_)
                | Self::Timeout(_)
                | Self::Overloaded
                | Self::ServiceClosed
        )
    }
}

impl From<hyper::Error> for HttpError {
    fn from(err: hyper::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl From<hyper_util::client::legacy::Error> for HttpError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}
