//! Wire types of the help center API.
//!
//! Keys are camelCase and every reply field is optional on the wire, so reply
//! types deserialize missing fields as their defaults.

use serde::{Deserialize, Serialize};

/// Help category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HelpCategoryInfo {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub order: i32,
    /// 1 enabled, 0 disabled
    pub status: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl HelpCategoryInfo {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.status == 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListHelpCategoriesReply {
    pub list: Vec<HelpCategoryInfo>,
}

/// Frequently asked question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HelpFaqInfo {
    pub id: String,
    /// Owning category. Not checked against the category list.
    pub category_id: String,
    pub question: String,
    pub answer: String,
    pub order_num: i32,
    pub view_count: i32,
    pub helpful_count: i32,
    pub unhelpful_count: i32,
    pub is_hot: bool,
    pub status: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// Query parameters of the FAQ list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListHelpFaqsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListHelpFaqsReply {
    pub total: i32,
    pub list: Vec<HelpFaqInfo>,
}

/// Feedback submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackReq {
    pub category: String,
    pub description: String,
    /// Image URLs as a JSON array encoded into a string, e.g. `"[\"a.png\"]"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl SubmitFeedbackReq {
    #[must_use]
    pub fn new(category: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            images: None,
            contact: None,
        }
    }

    /// Encode `images` into the string form the server expects.
    /// An empty slice clears the field.
    ///
    /// # Errors
    /// Returns an error if an item cannot be serialized to JSON.
    pub fn with_images<T: Serialize>(mut self, images: &[T]) -> Result<Self, serde_json::Error> {
        self.images = if images.is_empty() {
            None
        } else {
            Some(serde_json::to_string(images)?)
        };
        Ok(self)
    }

    #[must_use]
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmitFeedbackReply {
    pub id: String,
}
