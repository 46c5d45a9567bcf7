use appkit_api::{ApiError, RequestOptions};
use async_trait::async_trait;

use crate::models::GetUserInfoReply;

/// Public API of the user resource (Version 1).
#[async_trait]
pub trait UserClientV1: Send + Sync {
    /// Get the signed-in user's info.
    async fn get_user_info(
        &self,
        options: Option<&RequestOptions>,
    ) -> Result<GetUserInfoReply, ApiError>;
}
