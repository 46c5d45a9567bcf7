use std::fmt;
use std::sync::Arc;

use appkit_api::RequestOptions;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use user_profile_sdk::{DEFAULT_AVATAR, UserClientV1, UserProfile};

use crate::error::StoreError;
use crate::mapper::{map_user_info, normalize_avatar};
use crate::storage::{ProfileStorage, StorageError};

/// Storage key of the persisted snapshot.
pub const PERSIST_KEY: &str = "user";

/// Persisted form: `{"userInfo": {...}}`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<P> {
    user_info: Option<P>,
}

#[derive(Default)]
struct State {
    profile: Option<UserProfile>,
    /// Bumped by `set`, `set_avatar` and `clear`.
    edits: u64,
    /// Bumped by every fetch start.
    fetches_started: u64,
    /// Sequence number of the newest fetch whose result was applied.
    fetch_applied: u64,
}

/// Where a fetch started, to decide whether its result may still land.
#[derive(Clone, Copy)]
struct FetchTicket {
    seq: u64,
    edits: u64,
}

impl State {
    fn accepts(&self, ticket: FetchTicket) -> bool {
        self.edits == ticket.edits && ticket.seq > self.fetch_applied
    }
}

/// Holder of the signed-in user's profile.
///
/// Every mutation is written through to storage under [`PERSIST_KEY`].
/// Storage failures are logged and never fail the in-memory mutation.
///
/// A successful fetch is applied unless the profile was edited (`set`,
/// `set_avatar`, `clear`) or a newer fetch succeeded while it was in flight.
/// A failed fetch changes nothing, so it never blocks an older one. A
/// superseded fetch still returns its profile to its caller.
pub struct UserStore {
    client: Arc<dyn UserClientV1>,
    storage: Arc<dyn ProfileStorage>,
    state: RwLock<State>,
}

impl fmt::Debug for UserStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserStore")
            .field("profile", &self.state.read().profile)
            .finish_non_exhaustive()
    }
}

impl UserStore {
    /// Create the store, restoring the persisted snapshot if there is one.
    ///
    /// An unreadable snapshot is logged and the store starts unset.
    #[must_use]
    pub fn new(client: Arc<dyn UserClientV1>, storage: Arc<dyn ProfileStorage>) -> Self {
        let profile = match load_snapshot(storage.as_ref()) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(key = PERSIST_KEY, error = %e, "ignoring unreadable profile snapshot");
                None
            }
        };
        if let Some(profile) = &profile {
            tracing::debug!(user_id = ?profile.user_id, "profile restored from storage");
        }

        Self {
            client,
            storage,
            state: RwLock::new(State {
                profile,
                ..State::default()
            }),
        }
    }

    /// Load the current user from the server and store it.
    ///
    /// # Errors
    /// Returns `StoreError::Api` if the call fails; the state is left unchanged.
    pub async fn fetch(&self, options: Option<&RequestOptions>) -> Result<UserProfile, StoreError> {
        let ticket = {
            let mut state = self.state.write();
            state.fetches_started += 1;
            FetchTicket {
                seq: state.fetches_started,
                edits: state.edits,
            }
        };

        let reply = self.client.get_user_info(options).await?;
        let profile = normalize_avatar(map_user_info(&reply));

        let mut state = self.state.write();
        if state.accepts(ticket) {
            state.fetch_applied = ticket.seq;
            self.replace(&mut state, Some(profile.clone()));
            tracing::info!(user_id = ?profile.user_id, "user profile fetched");
        } else {
            tracing::debug!(
                user_id = ?profile.user_id,
                "profile fetch superseded by a newer change, not applied"
            );
        }
        Ok(profile)
    }

    /// Replace the profile. An empty avatar becomes [`DEFAULT_AVATAR`].
    pub fn set(&self, profile: UserProfile) {
        let profile = normalize_avatar(profile);
        let mut state = self.state.write();
        state.edits += 1;
        tracing::info!(user_id = ?profile.user_id, "user profile set");
        self.replace(&mut state, Some(profile));
    }

    /// Change only the avatar of the current profile.
    ///
    /// # Errors
    /// Returns `StoreError::NotPopulated` if no profile is loaded.
    pub fn set_avatar(&self, avatar: impl Into<String>) -> Result<(), StoreError> {
        let mut state = self.state.write();
        let Some(current) = &state.profile else {
            return Err(StoreError::NotPopulated);
        };
        let updated = UserProfile {
            avatar: avatar.into(),
            ..current.clone()
        };
        state.edits += 1;
        self.replace(&mut state, Some(updated));
        Ok(())
    }

    /// Forget the profile and delete the snapshot.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.edits += 1;
        self.replace(&mut state, None);
        tracing::info!("user profile cleared");
    }

    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.state.read().profile.clone()
    }

    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.state.read().profile.is_some()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.state.read().profile.as_ref().and_then(|p| p.user_id)
    }

    /// The avatar to display, [`DEFAULT_AVATAR`] when no profile is loaded.
    #[must_use]
    pub fn avatar(&self) -> String {
        self.state
            .read()
            .profile
            .as_ref()
            .map_or_else(|| DEFAULT_AVATAR.to_owned(), |p| p.avatar.clone())
    }

    /// Swap the profile and write it through. Called with the write lock held
    /// so snapshots land in the same order as state changes.
    fn replace(&self, state: &mut State, profile: Option<UserProfile>) {
        state.profile = profile;
        let result = match &state.profile {
            Some(profile) => save_snapshot(self.storage.as_ref(), profile),
            None => self.storage.remove(PERSIST_KEY),
        };
        if let Err(e) = result {
            tracing::warn!(key = PERSIST_KEY, error = %e, "failed to persist user profile");
        }
    }
}

fn load_snapshot(storage: &dyn ProfileStorage) -> Result<Option<UserProfile>, StorageError> {
    let Some(raw) = storage.get(PERSIST_KEY)? else {
        return Ok(None);
    };
    let snapshot: Snapshot<UserProfile> = serde_json::from_str(&raw)?;
    Ok(snapshot.user_info)
}

fn save_snapshot(storage: &dyn ProfileStorage, profile: &UserProfile) -> Result<(), StorageError> {
    let raw = serde_json::to_string(&Snapshot {
        user_info: Some(profile),
    })?;
    storage.set(PERSIST_KEY, &raw)
}
