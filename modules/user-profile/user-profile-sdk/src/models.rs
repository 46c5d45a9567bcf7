use serde::{Deserialize, Serialize};

/// Avatar shown when the user has none.
pub const DEFAULT_AVATAR: &str = "/static/images/default-avatar.png";

/// User record as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInfo {
    /// Numeric id in string form
    pub id: String,
    pub phone: String,
    pub nickname: String,
    pub gender: i32,
    pub avatar: String,
    pub profile: String,
    pub wx_gzh_user_id: String,
    pub wx_gzh_xcx_id: String,
    pub status: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetUserInfoReply {
    pub info: Option<UserInfo>,
}

/// The current user as the app sees it.
///
/// Derived from [`UserInfo`]; the server stays the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    /// `None` when the server id is missing or not an integer
    pub user_id: Option<i64>,
    /// The phone number the user signed in with
    pub username: String,
    pub nickname: String,
    pub avatar: String,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_info_reads_every_wire_field() {
        let reply: GetUserInfoReply = serde_json::from_value(json!({
            "info": {
                "id": "42",
                "phone": "13800000000",
                "nickname": "Al",
                "gender": 1,
                "avatar": "https://cdn/a.png",
                "profile": "hi",
                "wxGzhUserId": "gzh-1",
                "wxGzhXcxId": "xcx-1",
                "status": 1,
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-02T00:00:00Z"
            }
        }))
        .unwrap();

        let info = reply.info.unwrap();
        assert_eq!(info.wx_gzh_user_id, "gzh-1");
        assert_eq!(info.wx_gzh_xcx_id, "xcx-1");
        assert_eq!(info.gender, 1);
    }

    #[test]
    fn profile_uses_camel_case_and_null_id() {
        let profile = UserProfile {
            user_id: None,
            username: "555".to_owned(),
            ..UserProfile::default()
        };
        assert_eq!(
            serde_json::to_value(&profile).unwrap(),
            json!({"userId": null, "username": "555", "nickname": "", "avatar": ""})
        );
    }
}
