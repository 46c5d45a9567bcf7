//! Typed payloads carried in [`Status::details`](crate::Status::details).
//!
//! On the wire each detail is a JSON object whose `@type` member names the
//! payload, e.g. `type.googleapis.com/google.rpc.ErrorInfo`. Only the part
//! after the last `/` is significant when decoding.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::{Error as _, SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON member holding the detail type URL
pub const TYPE_KEY: &str = "@type";

/// Machine-readable cause of an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ErrorInfo {
    pub reason: String,
    pub domain: String,
    pub metadata: BTreeMap<String, String>,
}

/// Request fields that failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BadRequest {
    pub field_violations: Vec<FieldViolation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldViolation {
    pub field: String,
    pub description: String,
}

/// How long to wait before retrying. `retry_delay` keeps the wire form
/// (`"1.5s"`); nothing in this workspace retries automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetryInfo {
    pub retry_delay: String,
}

/// User-facing message in a specific locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalizedMessage {
    pub locale: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DebugInfo {
    pub stack_entries: Vec<String>,
    pub detail: String,
}

/// A detail with an unrecognized, missing or malformed `@type`, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownDetail {
    pub type_url: Option<String>,
    pub fields: Map<String, Value>,
}

/// One entry of `Status::details`, discriminated by its `@type`.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Any {
    ErrorInfo(ErrorInfo),
    BadRequest(BadRequest),
    RetryInfo(RetryInfo),
    LocalizedMessage(LocalizedMessage),
    DebugInfo(DebugInfo),
    Unknown(UnknownDetail),
}

impl Any {
    /// The `@type` URL this detail serializes with.
    #[must_use]
    pub fn type_url(&self) -> Option<&str> {
        match self {
            Self::ErrorInfo(_) => Some(ERROR_INFO_URL),
            Self::BadRequest(_) => Some(BAD_REQUEST_URL),
            Self::RetryInfo(_) => Some(RETRY_INFO_URL),
            Self::LocalizedMessage(_) => Some(LOCALIZED_MESSAGE_URL),
            Self::DebugInfo(_) => Some(DEBUG_INFO_URL),
            Self::Unknown(unknown) => unknown.type_url.as_deref(),
        }
    }

    fn from_parts(type_url: Option<String>, fields: Map<String, Value>) -> Self {
        let Some(url) = type_url else {
            return Self::Unknown(UnknownDetail {
                type_url: None,
                fields,
            });
        };

        let value = Value::Object(fields.clone());
        let typed = match url.rsplit('/').next().unwrap_or_default() {
            "google.rpc.ErrorInfo" => decode(&value, Self::ErrorInfo),
            "google.rpc.BadRequest" => decode(&value, Self::BadRequest),
            "google.rpc.RetryInfo" => decode(&value, Self::RetryInfo),
            "google.rpc.LocalizedMessage" => decode(&value, Self::LocalizedMessage),
            "google.rpc.DebugInfo" => decode(&value, Self::DebugInfo),
            _ => None,
        };

        typed.unwrap_or_else(|| {
            Self::Unknown(UnknownDetail {
                type_url: Some(url),
                fields,
            })
        })
    }
}

const ERROR_INFO_URL: &str = "type.googleapis.com/google.rpc.ErrorInfo";
const BAD_REQUEST_URL: &str = "type.googleapis.com/google.rpc.BadRequest";
const RETRY_INFO_URL: &str = "type.googleapis.com/google.rpc.RetryInfo";
const LOCALIZED_MESSAGE_URL: &str = "type.googleapis.com/google.rpc.LocalizedMessage";
const DEBUG_INFO_URL: &str = "type.googleapis.com/google.rpc.DebugInfo";

fn decode<T: DeserializeOwned>(value: &Value, wrap: fn(T) -> Any) -> Option<Any> {
    T::deserialize(value).ok().map(wrap)
}

impl<'de> Deserialize<'de> for Any {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::deserialize(deserializer)?;
        let type_url = match fields.remove(TYPE_KEY) {
            Some(Value::String(url)) => Some(url),
            Some(other) => {
                fields.insert(TYPE_KEY.to_owned(), other);
                None
            }
            None => None,
        };
        Ok(Self::from_parts(type_url, fields))
    }
}

impl Serialize for Any {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = match self {
            Self::ErrorInfo(v) => serde_json::to_value(v),
            Self::BadRequest(v) => serde_json::to_value(v),
            Self::RetryInfo(v) => serde_json::to_value(v),
            Self::LocalizedMessage(v) => serde_json::to_value(v),
            Self::DebugInfo(v) => serde_json::to_value(v),
            Self::Unknown(v) => Ok(Value::Object(v.fields.clone())),
        }
        .map_err(S::Error::custom)?;

        let mut map = serializer.serialize_map(None)?;
        if let Some(url) = self.type_url() {
            map.serialize_entry(TYPE_KEY, url)?;
        }
        if let Value::Object(fields) = &body {
            for (key, value) in fields {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl From<ErrorInfo> for Any {
    fn from(value: ErrorInfo) -> Self {
        Self::ErrorInfo(value)
    }
}

impl From<BadRequest> for Any {
    fn from(value: BadRequest) -> Self {
        Self::BadRequest(value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_types_decode_into_typed_variants() {
        let details: Vec<Any> = serde_json::from_value(json!([
            {"@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": "USER_NOT_FOUND", "domain": "user"},
            {"@type": "type.googleapis.com/google.rpc.BadRequest",
             "fieldViolations": [{"field": "category", "description": "required"}]},
            {"@type": "google.rpc.RetryInfo", "retryDelay": "2s"},
        ]))
        .unwrap();

        assert_eq!(
            details[0],
            Any::ErrorInfo(ErrorInfo {
                reason: "USER_NOT_FOUND".to_owned(),
                domain: "user".to_owned(),
                metadata: BTreeMap::new(),
            })
        );
        let Any::BadRequest(bad) = &details[1] else {
            panic!("expected BadRequest, got {:?}", details[1]);
        };
        assert_eq!(bad.field_violations[0].field, "category");
        assert_eq!(
            details[2],
            Any::RetryInfo(RetryInfo {
                retry_delay: "2s".to_owned()
            })
        );
    }

    #[test]
    fn unknown_type_keeps_raw_payload() {
        let detail: Any = serde_json::from_value(json!({
            "@type": "type.example.com/acme.QuotaFailure",
            "limit": 10
        }))
        .unwrap();

        let Any::Unknown(unknown) = &detail else {
            panic!("expected Unknown, got {detail:?}");
        };
        assert_eq!(
            unknown.type_url.as_deref(),
            Some("type.example.com/acme.QuotaFailure")
        );
        assert_eq!(unknown.fields["limit"], 10);
        assert_eq!(detail.type_url(), Some("type.example.com/acme.QuotaFailure"));
    }

    #[test]
    fn missing_or_malformed_type_is_unknown() {
        let missing: Any = serde_json::from_value(json!({"reason": "x"})).unwrap();
        assert!(matches!(missing, Any::Unknown(UnknownDetail { type_url: None, .. })));

        let malformed: Any = serde_json::from_value(json!({
            "@type": "type.googleapis.com/google.rpc.ErrorInfo",
            "reason": 42
        }))
        .unwrap();
        assert!(matches!(malformed, Any::Unknown(_)));
    }

    #[test]
    fn serializes_with_type_member() {
        let value = serde_json::to_value(Any::from(ErrorInfo {
            reason: "R".to_owned(),
            ..ErrorInfo::default()
        }))
        .unwrap();

        assert_eq!(value["@type"], ERROR_INFO_URL);
        assert_eq!(value["reason"], "R");
    }
}
