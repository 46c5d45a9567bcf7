//! Notification settings SDK
//!
//! - `NotificationSettingsClientV1` trait for reading and updating the current
//!   user's notification toggles and do-not-disturb window
//! - Wire types (`NotificationSettingsInfo`, `UpdateNotificationSettingsReq`, ...)
//! - `DndWindow`, a parsed `HH:mm` window with overnight wrap-around

#![forbid(unsafe_code)]

pub mod api;
pub mod dnd;
pub mod models;

pub use api::NotificationSettingsClientV1;
pub use dnd::{DndParseError, DndWindow};
pub use models::{
    GetNotificationSettingsReply, NotificationSettingsInfo, UpdateNotificationSettingsReply,
    UpdateNotificationSettingsReq,
};
