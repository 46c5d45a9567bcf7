use appkit_api::{ApiError, RequestOptions};
use async_trait::async_trait;

use crate::models::{
    GetNotificationSettingsReply, UpdateNotificationSettingsReply, UpdateNotificationSettingsReq,
};

/// Public API of the notification settings resource (Version 1).
#[async_trait]
pub trait NotificationSettingsClientV1: Send + Sync {
    /// Get the current user's settings.
    async fn get_notification_settings(
        &self,
        options: Option<&RequestOptions>,
    ) -> Result<GetNotificationSettingsReply, ApiError>;

    /// Update the current user's settings. See [`UpdateNotificationSettingsReq`]
    /// for how the server treats omitted fields.
    async fn update_notification_settings(
        &self,
        body: &UpdateNotificationSettingsReq,
        options: Option<&RequestOptions>,
    ) -> Result<UpdateNotificationSettingsReply, ApiError>;
}
