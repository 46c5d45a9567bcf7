#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Failure envelope returned by the `AppKit` backend (pure data model, no HTTP
//! dependencies).
//!
//! Every non-2xx reply carries a [`Status`]: a numeric code, a message and a
//! list of [`Any`] details tagged by `@type`.

pub mod details;
pub mod status;

pub use details::{
    Any, BadRequest, DebugInfo, ErrorInfo, FieldViolation, LocalizedMessage, RetryInfo,
    UnknownDetail,
};
pub use status::Status;
