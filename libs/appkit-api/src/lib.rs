#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Shared plumbing for the typed `AppKit` API modules.
//!
//! [`ApiClient`] joins a base URL with fixed endpoint paths, attaches the
//! bearer token, forwards query parameters and JSON bodies, applies caller
//! [`RequestOptions`] last and decodes the reply: a typed success value, or an
//! [`ApiError`] carrying the backend's [`Status`] envelope.
//!
//! ```ignore
//! let api = ApiConfig::default().build_client()?;
//! let reply: ListHelpCategoriesReply = api
//!     .call(Method::GET, "/app/v1/help/categories")
//!     .options(None)
//!     .send()
//!     .await?;
//! ```

mod client;
mod config;
mod error;

pub use appkit_errors::Status;
pub use appkit_http::{Method, RequestOptions, StatusCode};
pub use client::{ApiClient, ApiRequest};
pub use config::ApiConfig;
pub use error::ApiError;
