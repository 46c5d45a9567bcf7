#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! REST client for the notification settings resource.

mod rest_client;

pub use notification_settings_sdk::NotificationSettingsClientV1;
pub use rest_client::{RestClient, SETTINGS_PATH};
