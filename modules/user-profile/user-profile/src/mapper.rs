use user_profile_sdk::{DEFAULT_AVATAR, GetUserInfoReply, UserProfile};

/// Derive the app-side profile from a user-info reply.
///
/// Missing fields become empty strings. The avatar is kept as sent;
/// see [`normalize_avatar`]. `user_id` is set only for an integer id
/// (surrounding whitespace allowed); `""`, `"4.2"` and `"1e3"` give `None`.
#[must_use]
pub fn map_user_info(reply: &GetUserInfoReply) -> UserProfile {
    let Some(info) = &reply.info else {
        return UserProfile::default();
    };
    UserProfile {
        user_id: parse_user_id(&info.id),
        username: info.phone.clone(),
        nickname: info.nickname.clone(),
        avatar: info.avatar.clone(),
    }
}

/// Replace an empty avatar with [`DEFAULT_AVATAR`].
#[must_use]
pub fn normalize_avatar(mut profile: UserProfile) -> UserProfile {
    if profile.avatar.is_empty() {
        DEFAULT_AVATAR.clone_into(&mut profile.avatar);
    }
    profile
}

fn parse_user_id(id: &str) -> Option<i64> {
    id.trim().parse().ok()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use user_profile_sdk::UserInfo;

    fn reply(id: &str, avatar: &str) -> GetUserInfoReply {
        GetUserInfoReply {
            info: Some(UserInfo {
                id: id.to_owned(),
                phone: "13800000000".to_owned(),
                nickname: "Al".to_owned(),
                avatar: avatar.to_owned(),
                ..UserInfo::default()
            }),
        }
    }

    #[test]
    fn maps_id_phone_nickname_avatar() {
        assert_eq!(
            map_user_info(&reply("42", "")),
            UserProfile {
                user_id: Some(42),
                username: "13800000000".to_owned(),
                nickname: "Al".to_owned(),
                avatar: String::new(),
            }
        );
    }

    #[test]
    fn unparsable_id_is_none() {
        for id in ["", "abc", "4.2", "1e3", "NaN", "99999999999999999999"] {
            assert_eq!(map_user_info(&reply(id, "")).user_id, None, "id {id:?}");
        }
        assert_eq!(map_user_info(&reply(" 7 ", "")).user_id, Some(7));
    }

    #[test]
    fn missing_info_maps_to_empty_profile() {
        assert_eq!(
            map_user_info(&GetUserInfoReply::default()),
            UserProfile::default()
        );
    }

    #[test]
    fn normalize_only_fills_empty_avatar() {
        let filled = normalize_avatar(map_user_info(&reply("1", "")));
        assert_eq!(filled.avatar, DEFAULT_AVATAR);

        let kept = normalize_avatar(map_user_info(&reply("1", "https://cdn/a.png")));
        assert_eq!(kept.avatar, "https://cdn/a.png");
    }
}
