use appkit_api::{ApiClient, ApiError, Method, RequestOptions};
use async_trait::async_trait;
use help_center_sdk::{
    HelpCenterClientV1, ListHelpCategoriesReply, ListHelpFaqsParams, ListHelpFaqsReply,
    SubmitFeedbackReply, SubmitFeedbackReq,
};

/// Endpoint paths, relative to the API base URL.
pub mod paths {
    pub const CATEGORIES: &str = "/app/v1/help/categories";
    pub const FAQS: &str = "/app/v1/help/faqs";
    pub const FEEDBACK: &str = "/app/v1/help/feedback";
}

/// [`HelpCenterClientV1`] over HTTP.
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
impl HelpCenterClientV1 for RestClient {
    async fn list_help_categories(
        &self,
        options: Option<&RequestOptions>,
    ) -> Result<ListHelpCategoriesReply, ApiError> {
        self.api
            .call(Method::GET, paths::CATEGORIES)
            .options(options)
            .send()
            .await
    }

    async fn list_help_faqs(
        &self,
        params: &ListHelpFaqsParams,
        options: Option<&RequestOptions>,
    ) -> Result<ListHelpFaqsReply, ApiError> {
        self.api
            .call(Method::GET, paths::FAQS)
            .query(params)?
            .options(options)
            .send()
            .await
    }

    async fn submit_feedback(
        &self,
        body: &SubmitFeedbackReq,
        options: Option<&RequestOptions>,
    ) -> Result<SubmitFeedbackReply, ApiError> {
        let reply: SubmitFeedbackReply = self
            .api
            .call(Method::POST, paths::FEEDBACK)
            .json(body)?
            .options(options)
            .send()
            .await?;
        tracing::debug!(feedback_id = %reply.id, category = %body.category, "feedback submitted");
        Ok(reply)
    }
}
