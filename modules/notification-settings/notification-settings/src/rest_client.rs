use appkit_api::{ApiClient, ApiError, Method, RequestOptions};
use async_trait::async_trait;
use notification_settings_sdk::{
    GetNotificationSettingsReply, NotificationSettingsClientV1, UpdateNotificationSettingsReply,
    UpdateNotificationSettingsReq,
};

/// Read with GET, updated with PUT.
pub const SETTINGS_PATH: &str = "/app/v1/notification/settings";

/// [`NotificationSettingsClientV1`] over HTTP.
#[derive(Clone, Debug)]
pub struct RestClient {
    api: ApiClient,
}

impl RestClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl NotificationSettingsClientV1 for RestClient {
    async fn get_notification_settings(
        &self,
        options: Option<&RequestOptions>,
    ) -> Result<GetNotificationSettingsReply, ApiError> {
        self.api
            .call(Method::GET, SETTINGS_PATH)
            .options(options)
            .send()
            .await
    }

    async fn update_notification_settings(
        &self,
        body: &UpdateNotificationSettingsReq,
        options: Option<&RequestOptions>,
    ) -> Result<UpdateNotificationSettingsReply, ApiError> {
        self.api
            .call(Method::PUT, SETTINGS_PATH)
            .json(body)?
            .options(options)
            .send()
            .await
    }
}
