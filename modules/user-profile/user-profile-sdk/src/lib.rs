//! User profile SDK
//!
//! - `UserClientV1` trait for the user-info endpoint
//! - Wire types (`UserInfo`, `GetUserInfoReply`)
//! - `UserProfile`, the normalized client-side view of the current user

#![forbid(unsafe_code)]

pub mod api;
pub mod models;

pub use api::UserClientV1;
pub use models::{DEFAULT_AVATAR, GetUserInfoReply, UserInfo, UserProfile};
