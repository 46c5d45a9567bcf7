//! Help center SDK
//!
//! This crate provides the public API for the help center:
//! - `HelpCenterClientV1` trait implemented by the REST client and by test fakes
//! - Wire types for categories, FAQs and feedback
//!
//! ```ignore
//! let client: Arc<dyn HelpCenterClientV1> = Arc::new(RestClient::new(api));
//! let categories = client.list_help_categories(None).await?;
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod models;

pub use api::HelpCenterClientV1;
pub use models::{
    HelpCategoryInfo, HelpFaqInfo, ListHelpCategoriesReply, ListHelpFaqsParams, ListHelpFaqsReply,
    SubmitFeedbackReply, SubmitFeedbackReq,
};
