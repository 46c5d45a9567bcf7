use appkit_api::{ApiClient, ApiError, Method, RequestOptions};
use async_trait::async_trait;
use user_profile_sdk::{GetUserInfoReply, UserClientV1};

pub const USER_INFO_PATH: &str = "/app/v1/user/info";

/// [`UserClientV1`] over HTTP.
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
impl UserClientV1 for RestClient {
    async fn get_user_info(
        &self,
        options: Option<&RequestOptions>,
    ) -> Result<GetUserInfoReply, ApiError> {
        self.api
            .call(Method::GET, USER_INFO_PATH)
            .options(options)
            .send()
            .await
    }
}
