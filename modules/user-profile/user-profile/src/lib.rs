#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! User info REST client and the client-side user profile store.
//!
//! [`UserStore`] holds the signed-in user's [`UserProfile`], refreshes it
//! through any [`UserClientV1`] and persists a snapshot through a
//! [`ProfileStorage`] adapter so the profile survives restarts.
//!
//! ```ignore
//! let client = Arc::new(RestClient::new(api));
//! let storage = Arc::new(FileStorage::open(data_dir)?);
//! let store = UserStore::new(client, storage);
//! let profile = store.fetch(None).await?;
//! ```

mod error;
mod mapper;
mod rest_client;
pub mod storage;
mod store;

pub use error::StoreError;
pub use mapper::{map_user_info, normalize_avatar};
pub use rest_client::{RestClient, USER_INFO_PATH};
pub use storage::{FileStorage, MemoryStorage, ProfileStorage, StorageError};
pub use store::{PERSIST_KEY, UserStore};
pub use user_profile_sdk::{DEFAULT_AVATAR, UserClientV1, UserProfile};
