use appkit_errors::Status;
use appkit_http::{HttpError, StatusCode};
use thiserror::Error;

/// Failure of a typed API call
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request never produced a readable reply (connection, TLS, timeout,
    /// invalid header, oversized body, ...)
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// Non-2xx reply carrying the backend's error envelope
    #[error("API error (HTTP {http_status}): {status}")]
    Status {
        http_status: StatusCode,
        status: Status,
    },

    /// Non-2xx reply whose body is not an error envelope (proxy pages, plain text)
    #[error("unexpected HTTP {http_status}: {body_preview}")]
    UnexpectedStatus {
        http_status: StatusCode,
        body_preview: String,
    },

    /// 2xx reply that does not match the expected shape
    #[error("failed to decode reply: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    /// The decoded error envelope, for `Status` failures
    #[must_use]
    pub fn status(&self) -> Option<&Status> {
        match self {
            Self::Status { status, .. } => Some(status),
            _ => None,
        }
    }

    /// HTTP status of the reply, when one was received
    #[must_use]
    pub fn http_status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { http_status, .. } | Self::UnexpectedStatus { http_status, .. } => {
                Some(*http_status)
            }
            _ => None,
        }
    }

    /// Application error code from the envelope
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        self.status().map(|status| status.code)
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
