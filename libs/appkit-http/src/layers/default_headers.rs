use std::sync::Arc;
use std::task::{Context, Poll};

use http::header::{HeaderName, HeaderValue, USER_AGENT};
use http::{Request, Response};
use tower::{Layer, Service};

use crate::error::HttpError;

/// Inserts the client's default headers into requests that lack them.
#[derive(Clone, Debug)]
pub struct DefaultHeadersLayer {
    defaults: Arc<[(HeaderName, HeaderValue)]>,
}

impl DefaultHeadersLayer {
    /// `user_agent` becomes the `user-agent` default, followed by `extra`.
    ///
    /// # Errors
    /// `HttpError::InvalidHeaderName` or `HttpError::InvalidHeaderValue`.
    pub fn try_new(
        user_agent: impl AsRef<str>,
        extra: &[(String, String)],
    ) -> Result<Self, HttpError> {
        let agent = (USER_AGENT, HeaderValue::from_str(user_agent.as_ref())?);
        let defaults = std::iter::once(Ok(agent))
            .chain(extra.iter().map(|(name, value)| {
                Ok::<_, HttpError>((
                    HeaderName::from_bytes(name.as_bytes())?,
                    HeaderValue::from_str(value)?,
                ))
            }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            defaults: defaults.into(),
        })
    }
}

impl<S> Layer<S> for DefaultHeadersLayer {
    type Service = DefaultHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DefaultHeadersService {
            inner,
            defaults: Arc::clone(&self.defaults),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DefaultHeadersService<S> {
    inner: S,
    defaults: Arc<[(HeaderName, HeaderValue)]>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for DefaultHeadersService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let headers = req.headers_mut();
        for (name, value) in self.defaults.iter() {
            headers.entry(name).or_insert_with(|| value.clone());
        }
        self.inner.call(req)
    }
}
