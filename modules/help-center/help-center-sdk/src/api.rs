//! `HelpCenterClientV1` trait definition.

use appkit_api::{ApiError, RequestOptions};
use async_trait::async_trait;

use crate::models::{
    ListHelpCategoriesReply, ListHelpFaqsParams, ListHelpFaqsReply, SubmitFeedbackReply,
    SubmitFeedbackReq,
};

/// Public API of the help center (Version 1).
///
/// Each method issues exactly one request. `options` carries caller transport
/// overrides (extra headers, per-call timeout) and is applied after every default.
#[async_trait]
pub trait HelpCenterClientV1: Send + Sync {
    /// List help categories.
    async fn list_help_categories(
        &self,
        options: Option<&RequestOptions>,
    ) -> Result<ListHelpCategoriesReply, ApiError>;

    /// List FAQs, optionally filtered by category and keyword.
    /// Unset params are not sent.
    async fn list_help_faqs(
        &self,
        params: &ListHelpFaqsParams,
        options: Option<&RequestOptions>,
    ) -> Result<ListHelpFaqsReply, ApiError>;

    /// Submit user feedback. Returns the id assigned by the server.
    async fn submit_feedback(
        &self,
        body: &SubmitFeedbackReq,
        options: Option<&RequestOptions>,
    ) -> Result<SubmitFeedbackReply, ApiError>;
}
