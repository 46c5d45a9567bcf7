use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;

use crate::error::HttpError;
use crate::security::ERROR_BODY_PREVIEW_LIMIT;

/// Decompressed, type-erased response body
pub type ResponseBody =
    http_body_util::combinators::BoxBody<Bytes, Box<dyn std::error::Error + Send + Sync>>;

/// A received response whose body has not been read yet.
///
/// `bytes` reads the body whatever the status. `checked_bytes`, `json` and
/// `text` turn a non-2xx status into [`HttpError::HttpStatus`] with a short
/// body preview. Every reader stops at the client's body size limit.
#[derive(Debug)]
pub struct HttpResponse {
    pub(crate) inner: Response<ResponseBody>,
    pub(crate) max_body_size: usize,
}

impl HttpResponse {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        header_content_type(self.inner.headers())
    }

    /// Fail on a non-2xx status without touching the body.
    ///
    /// # Errors
    /// `HttpError::HttpStatus` with an empty preview.
    pub fn error_for_status(self) -> Result<Self, HttpError> {
        if self.status().is_success() {
            Ok(self)
        } else {
            Err(HttpError::HttpStatus {
                status: self.status(),
                body_preview: String::new(),
                content_type: self.content_type().map(str::to_owned),
            })
        }
    }

    /// # Errors
    /// `HttpError::BodyTooLarge` past the size limit, `HttpError::Transport`
    /// if the connection drops mid-body.
    pub async fn bytes(self) -> Result<Bytes, HttpError> {
        collect_limited(self.inner, self.max_body_size).await
    }

    /// # Errors
    /// As [`bytes`](Self::bytes), plus `HttpError::HttpStatus` for non-2xx.
    pub async fn checked_bytes(self) -> Result<Bytes, HttpError> {
        collect_success(self.inner, self.max_body_size).await
    }

    /// # Errors
    /// As [`checked_bytes`](Self::checked_bytes), plus `HttpError::Json`.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, HttpError> {
        let body = collect_success(self.inner, self.max_body_size).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Lossy UTF-8.
    ///
    /// # Errors
    /// As [`checked_bytes`](Self::checked_bytes).
    pub async fn text(self) -> Result<String, HttpError> {
        let body = collect_success(self.inner, self.max_body_size).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

fn header_content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
}

async fn collect_success(
    response: Response<ResponseBody>,
    limit: usize,
) -> Result<Bytes, HttpError> {
    let status = response.status();
    if status.is_success() {
        return collect_limited(response, limit).await;
    }

    let content_type = header_content_type(response.headers()).map(str::to_owned);
    let body_preview =
        match collect_limited(response, limit.min(ERROR_BODY_PREVIEW_LIMIT)).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            // the status is the more useful error
            Err(HttpError::BodyTooLarge { .. }) => "<body too large for preview>".to_owned(),
            Err(e) => return Err(e),
        };
    Err(HttpError::HttpStatus {
        status,
        body_preview,
        content_type,
    })
}

async fn collect_limited(response: Response<ResponseBody>, limit: usize) -> Result<Bytes, HttpError> {
    let mut body = std::pin::pin!(response.into_body());
    let mut buf = Vec::new();

    while let Some(frame) = body.frame().await {
        let Ok(data) = frame.map_err(HttpError::Transport)?.into_data() else {
            continue;
        };
        let total = buf.len() + data.len();
        if total > limit {
            return Err(HttpError::BodyTooLarge {
                limit,
                actual: total,
            });
        }
        buf.extend_from_slice(&data);
    }

    Ok(buf.into())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use http_body_util::Full;

    fn reply(status: u16, body: &'static str) -> HttpResponse {
        let body = Full::new(Bytes::from_static(body.as_bytes()))
            .map_err(|never| match never {})
            .boxed();
        HttpResponse {
            inner: Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
            max_body_size: 16,
        }
    }

    #[tokio::test]
    async fn json_reads_success_body() {
        let value: serde_json::Value = reply(200, r#"{"id":"7"}"#).json().await.unwrap();
        assert_eq!(value["id"], "7");
    }

    #[tokio::test]
    async fn bytes_ignores_status_but_not_limit() {
        assert_eq!(reply(404, "gone").bytes().await.unwrap(), "gone");

        let err = reply(200, "0123456789abcdefXYZ").bytes().await.unwrap_err();
        assert!(matches!(
            err,
            HttpError::BodyTooLarge {
                limit: 16,
                actual: 19
            }
        ));
    }

    #[tokio::test]
    async fn checked_read_reports_status_even_for_huge_body() {
        let err = reply(500, "0123456789abcdefXYZ")
            .checked_bytes()
            .await
            .unwrap_err();
        let HttpError::HttpStatus {
            status,
            body_preview,
            content_type,
        } = err
        else {
            panic!("expected HttpStatus, got {err:?}");
        };
        assert_eq!(status, 500);
        assert_eq!(body_preview, "<body too large for preview>");
        assert_eq!(content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn text_is_lossy() {
        assert_eq!(reply(200, "plain").text().await.unwrap(), "plain");
    }

    #[test]
    fn error_for_status_passes_success() {
        assert!(reply(204, "").error_for_status().is_ok());
        assert!(matches!(
            reply(401, "").error_for_status(),
            Err(HttpError::HttpStatus { status, .. }) if status == 401
        ));
    }
}
