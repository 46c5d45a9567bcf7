#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::Arc;

use appkit_api::{ApiError, RequestOptions, Status, StatusCode};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use user_profile::{
    DEFAULT_AVATAR, MemoryStorage, PERSIST_KEY, ProfileStorage, StoreError, UserClientV1,
    UserProfile, UserStore,
};
use user_profile_sdk::{GetUserInfoReply, UserInfo};

fn reply(id: &str, phone: &str, nickname: &str, avatar: &str) -> GetUserInfoReply {
    GetUserInfoReply {
        info: Some(UserInfo {
            id: id.to_owned(),
            phone: phone.to_owned(),
            nickname: nickname.to_owned(),
            avatar: avatar.to_owned(),
            ..UserInfo::default()
        }),
    }
}

fn unauthorized() -> ApiError {
    ApiError::Status {
        http_status: StatusCode::UNAUTHORIZED,
        status: Status::new(401, "token expired"),
    }
}

fn profile(id: i64, avatar: &str) -> UserProfile {
    UserProfile {
        user_id: Some(id),
        username: "13800000000".to_owned(),
        nickname: "Al".to_owned(),
        avatar: avatar.to_owned(),
    }
}

/// Replies from a queue, one per call.
#[derive(Default)]
struct ScriptedClient {
    replies: Mutex<VecDeque<Result<GetUserInfoReply, ApiError>>>,
}

impl ScriptedClient {
    fn with(replies: impl IntoIterator<Item = Result<GetUserInfoReply, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
        })
    }
}

#[async_trait]
impl UserClientV1 for ScriptedClient {
    async fn get_user_info(
        &self,
        _options: Option<&RequestOptions>,
    ) -> Result<GetUserInfoReply, ApiError> {
        self.replies
            .lock()
            .pop_front()
            .expect("unexpected get_user_info call")
    }
}

/// Signals `entered` when called, then waits for `release`.
#[derive(Default)]
struct GatedClient {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl UserClientV1 for GatedClient {
    async fn get_user_info(
        &self,
        _options: Option<&RequestOptions>,
    ) -> Result<GetUserInfoReply, ApiError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(reply("1", "111", "old", "old.png"))
    }
}

/// First call waits for `release` and then returns `first`; later calls
/// return `rest` in order without waiting.
struct FirstCallGated {
    entered: Notify,
    release: Notify,
    first: Mutex<Option<Result<GetUserInfoReply, ApiError>>>,
    rest: Mutex<VecDeque<Result<GetUserInfoReply, ApiError>>>,
}

impl FirstCallGated {
    fn new(
        first: Result<GetUserInfoReply, ApiError>,
        rest: impl IntoIterator<Item = Result<GetUserInfoReply, ApiError>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            entered: Notify::new(),
            release: Notify::new(),
            first: Mutex::new(Some(first)),
            rest: Mutex::new(rest.into_iter().collect()),
        })
    }
}

#[async_trait]
impl UserClientV1 for FirstCallGated {
    async fn get_user_info(
        &self,
        _options: Option<&RequestOptions>,
    ) -> Result<GetUserInfoReply, ApiError> {
        let first = self.first.lock().take();
        if let Some(first) = first {
            self.entered.notify_one();
            self.release.notified().await;
            return first;
        }
        self.rest
            .lock()
            .pop_front()
            .expect("unexpected get_user_info call")
    }
}

#[tokio::test]
async fn fetch_normalizes_and_persists() {
    let storage = Arc::new(MemoryStorage::new());
    let client = ScriptedClient::with([Ok(reply("7", "555", "N", "http://x/a.png"))]);
    let store = UserStore::new(client, storage.clone());
    assert!(!store.is_populated());

    let fetched = store.fetch(None).await.unwrap();

    let expected = UserProfile {
        user_id: Some(7),
        username: "555".to_owned(),
        nickname: "N".to_owned(),
        avatar: "http://x/a.png".to_owned(),
    };
    assert_eq!(fetched, expected);
    assert_eq!(store.profile(), Some(expected));
    assert_eq!(store.user_id(), Some(7));
    assert!(storage.peek(PERSIST_KEY).unwrap().contains("\"userId\":7"));
}

#[tokio::test]
async fn failed_fetch_leaves_state_unchanged() {
    let storage = Arc::new(MemoryStorage::new());
    let client = ScriptedClient::with([
        Ok(reply("7", "555", "N", "http://x/a.png")),
        Err(unauthorized()),
    ]);
    let store = UserStore::new(client, storage.clone());

    let before = store.fetch(None).await.unwrap();
    let snapshot = storage.peek(PERSIST_KEY);

    let err = store.fetch(None).await.unwrap_err();
    assert!(matches!(err, StoreError::Api(ref api) if api.code() == Some(401)));
    assert_eq!(store.profile(), Some(before));
    assert_eq!(storage.peek(PERSIST_KEY), snapshot);
}

#[tokio::test]
async fn fetch_with_empty_avatar_uses_default() {
    let client = ScriptedClient::with([Ok(reply("x", "555", "", ""))]);
    let store = UserStore::new(client, Arc::new(MemoryStorage::new()));

    let fetched = store.fetch(None).await.unwrap();

    assert_eq!(fetched.user_id, None);
    assert_eq!(fetched.avatar, DEFAULT_AVATAR);
    assert!(store.is_populated());
}

#[test]
fn set_fills_only_an_empty_avatar() {
    let store = UserStore::new(ScriptedClient::with([]), Arc::new(MemoryStorage::new()));

    store.set(profile(1, ""));
    assert_eq!(store.avatar(), DEFAULT_AVATAR);

    store.set(profile(1, "https://cdn/me.png"));
    assert_eq!(store.avatar(), "https://cdn/me.png");
}

#[test]
fn set_avatar_changes_only_the_avatar() {
    let store = UserStore::new(ScriptedClient::with([]), Arc::new(MemoryStorage::new()));
    store.set(profile(9, "a.png"));

    store.set_avatar("b.png").unwrap();

    assert_eq!(store.profile(), Some(profile(9, "b.png")));
}

#[test]
fn set_avatar_requires_a_profile() {
    let storage = Arc::new(MemoryStorage::new());
    let store = UserStore::new(ScriptedClient::with([]), storage.clone());

    assert!(matches!(
        store.set_avatar("b.png"),
        Err(StoreError::NotPopulated)
    ));
    assert!(!store.is_populated());
    assert_eq!(storage.peek(PERSIST_KEY), None);
}

#[test]
fn clear_resets_and_removes_snapshot() {
    let storage = Arc::new(MemoryStorage::new());
    let store = UserStore::new(ScriptedClient::with([]), storage.clone());
    store.set(profile(1, "a.png"));
    assert!(storage.peek(PERSIST_KEY).is_some());

    store.clear();

    assert!(!store.is_populated());
    assert_eq!(store.profile(), None);
    assert_eq!(store.avatar(), DEFAULT_AVATAR);
    assert_eq!(storage.peek(PERSIST_KEY), None);
}

#[test]
fn new_store_rehydrates_snapshot() {
    let storage = Arc::new(MemoryStorage::new());
    UserStore::new(ScriptedClient::with([]), storage.clone()).set(profile(5, "a.png"));

    let restored = UserStore::new(ScriptedClient::with([]), storage);

    assert_eq!(restored.profile(), Some(profile(5, "a.png")));
}

#[test]
fn storage_failure_does_not_fail_mutation() {
    let storage = Arc::new(MemoryStorage::new());
    let store = UserStore::new(ScriptedClient::with([]), storage.clone());
    storage.set_fail_writes(true);

    store.set(profile(2, "a.png"));
    store.set_avatar("b.png").unwrap();
    assert_eq!(store.profile(), Some(profile(2, "b.png")));
    assert_eq!(storage.get(PERSIST_KEY).unwrap(), None);

    store.clear();
    assert!(!store.is_populated());
}

#[tokio::test]
async fn superseded_fetch_does_not_overwrite_newer_state() {
    let client = Arc::new(GatedClient::default());
    let storage = Arc::new(MemoryStorage::new());
    let store = Arc::new(UserStore::new(client.clone(), storage.clone()));

    let fetch = tokio::spawn({
        let store = store.clone();
        async move { store.fetch(None).await }
    });
    client.entered.notified().await;

    store.set(profile(2, "new.png"));
    client.release.notify_one();

    let fetched = fetch.await.unwrap().unwrap();
    assert_eq!(fetched.nickname, "old");
    assert_eq!(store.profile(), Some(profile(2, "new.png")));
    assert!(storage.peek(PERSIST_KEY).unwrap().contains("new.png"));
}

#[tokio::test]
async fn fetch_after_clear_repopulates() {
    let client = ScriptedClient::with([Ok(reply("3", "333", "C", "c.png"))]);
    let store = UserStore::new(client, Arc::new(MemoryStorage::new()));
    store.set(profile(1, "a.png"));
    store.clear();

    let fetched = store.fetch(None).await.unwrap();

    assert_eq!(store.profile(), Some(fetched));
}

#[tokio::test]
async fn older_fetch_applies_when_newer_fetch_fails() {
    let client = FirstCallGated::new(Ok(reply("7", "555", "N", "a.png")), [Err(unauthorized())]);
    let storage = Arc::new(MemoryStorage::new());
    let store = Arc::new(UserStore::new(client.clone(), storage.clone()));

    let slow = tokio::spawn({
        let store = store.clone();
        async move { store.fetch(None).await }
    });
    client.entered.notified().await;

    assert!(store.fetch(None).await.is_err());
    assert!(!store.is_populated());
    client.release.notify_one();

    let fetched = slow.await.unwrap().unwrap();
    assert_eq!(fetched.user_id, Some(7));
    assert_eq!(store.profile(), Some(fetched));
    assert!(storage.peek(PERSIST_KEY).unwrap().contains("\"userId\":7"));
}

#[tokio::test]
async fn older_fetch_does_not_replace_newer_fetch() {
    let client = FirstCallGated::new(
        Ok(reply("7", "555", "old", "old.png")),
        [Ok(reply("8", "555", "new", "new.png"))],
    );
    let store = Arc::new(UserStore::new(client.clone(), Arc::new(MemoryStorage::new())));

    let slow = tokio::spawn({
        let store = store.clone();
        async move { store.fetch(None).await }
    });
    client.entered.notified().await;

    let newer = store.fetch(None).await.unwrap();
    client.release.notify_one();

    let older = slow.await.unwrap().unwrap();
    assert_eq!(older.user_id, Some(7));
    assert_eq!(store.profile(), Some(newer));
    assert_eq!(store.user_id(), Some(8));
}
