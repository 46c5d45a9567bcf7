use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::details::{Any, ErrorInfo, FieldViolation, LocalizedMessage};

/// Error envelope of a failed API call.
///
/// `code` and `message` are always present in meaningful replies. The backend
/// may also send a top-level `reason` and `metadata`; they default to empty
/// when absent and are not serialized back when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[must_use]
pub struct Status {
    pub code: i32,
    pub message: String,
    pub details: Vec<Any>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Status {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Any>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// First `ErrorInfo` detail, if any.
    #[must_use]
    pub fn error_info(&self) -> Option<&ErrorInfo> {
        self.details.iter().find_map(|detail| match detail {
            Any::ErrorInfo(info) => Some(info),
            _ => None,
        })
    }

    /// All field violations across `BadRequest` details.
    pub fn field_violations(&self) -> impl Iterator<Item = &FieldViolation> {
        self.details
            .iter()
            .filter_map(|detail| match detail {
                Any::BadRequest(bad) => Some(bad.field_violations.iter()),
                _ => None,
            })
            .flatten()
    }

    /// First localized message, if any.
    #[must_use]
    pub fn localized_message(&self) -> Option<&LocalizedMessage> {
        self.details.iter().find_map(|detail| match detail {
            Any::LocalizedMessage(msg) => Some(msg),
            _ => None,
        })
    }

    /// Machine-readable reason: the top-level `reason`, else the first
    /// `ErrorInfo` reason.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        if !self.reason.is_empty() {
            return Some(&self.reason);
        }
        self.error_info()
            .map(|info| info.reason.as_str())
            .filter(|reason| !reason.is_empty())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Status {}
