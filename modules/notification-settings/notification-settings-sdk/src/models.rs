use serde::{Deserialize, Serialize};

use crate::dnd::{DndParseError, DndWindow};

/// The current user's notification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationSettingsInfo {
    pub id: String,
    pub user_id: String,
    pub system_notification: bool,
    pub activity_notification: bool,
    pub order_notification: bool,
    /// `HH:mm`, empty when unset
    pub dnd_start_time: String,
    /// `HH:mm`, empty when unset
    pub dnd_end_time: String,
    pub created_at: String,
    pub updated_at: String,
}

impl NotificationSettingsInfo {
    /// The configured quiet window, `None` when either bound is empty.
    ///
    /// # Errors
    /// Returns [`DndParseError`] if a bound is set but is not `HH:mm`.
    pub fn dnd_window(&self) -> Result<Option<DndWindow>, DndParseError> {
        if self.dnd_start_time.trim().is_empty() || self.dnd_end_time.trim().is_empty() {
            return Ok(None);
        }
        DndWindow::parse(&self.dnd_start_time, &self.dnd_end_time).map(Some)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetNotificationSettingsReply {
    pub settings: Option<NotificationSettingsInfo>,
}

/// Partial update. Unset fields are left out of the body.
///
/// The server stores all three toggles on every update, so an omitted toggle
/// is written as `false`. Send the current values for toggles you do not mean
/// to change. Empty DND strings are ignored by the server and leave the stored
/// window unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationSettingsReq {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnd_start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnd_end_time: Option<String>,
}

impl UpdateNotificationSettingsReq {
    /// Start from the stored toggles so only the fields changed afterwards differ.
    #[must_use]
    pub fn from_current(current: &NotificationSettingsInfo) -> Self {
        Self {
            system_notification: Some(current.system_notification),
            activity_notification: Some(current.activity_notification),
            order_notification: Some(current.order_notification),
            dnd_start_time: None,
            dnd_end_time: None,
        }
    }

    #[must_use]
    pub fn with_dnd_window(mut self, window: &DndWindow) -> Self {
        self.dnd_start_time = Some(window.start_hh_mm());
        self.dnd_end_time = Some(window.end_hh_mm());
        self
    }
}

/// Empty acknowledgement.
#[allow(clippy::empty_structs_with_brackets)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNotificationSettingsReply {}
