#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! HTTP transport shared by the `AppKit` API clients.
//!
//! One [`HttpClient`] wraps a pooled hyper client behind a tower buffer.
//! Requests are HTTPS-only unless plain HTTP is enabled explicitly. Each
//! request gets the client defaults (`user-agent`, `accept`), an optional
//! query string encoded from any `Serialize` value, and a JSON body with a
//! default `content-type`. [`RequestOptions`] are merged last, so their
//! headers and timeout replace the defaults. Compressed replies are decoded
//! transparently.
//!
//! Nothing is retried; every failure surfaces as an [`HttpError`].
//!
//! # Example
//!
//! ```ignore
//! use appkit_http::{HttpClient, RequestOptions};
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .user_agent("my-app/1.0")
//!     .build()?;
//!
//! let options = RequestOptions::new().header("x-request-id", "abc");
//! let faqs: FaqPage = client
//!     .get("https://api.example.com/app/v1/help/faqs")
//!     .query(&FaqQuery { page: Some(1) })?
//!     .options(Some(&options))
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod layers;
mod options;
mod request;
mod response;
pub mod security;
mod tls;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{DEFAULT_USER_AGENT, HttpClientConfig, TlsRootConfig, TransportSecurity};
pub use error::{HttpError, InvalidUriKind};
pub use layers::{DefaultHeadersLayer, DefaultHeadersService};
pub use options::RequestOptions;
pub use request::RequestBuilder;
pub use response::{HttpResponse, ResponseBody};

/// Re-exported so callers can name methods and status codes without a direct `http` dependency.
pub use http::{Method, StatusCode};
