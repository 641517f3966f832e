//! Infrastructure Layer
//!
//! Store implementations: remote PostgreSQL and client-local fallback, plus
//! the explicit switch between them.

pub mod local;
pub mod postgres;

pub use local::KvUserStore;
pub use postgres::PgUserStore;

use std::sync::Arc;

use platform::kv::KeyValueStore;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserStore;
use crate::domain::value_object::{secret::Secret, user_id::UserId};
use crate::error::AuthResult;

/// Explicit remote-vs-fallback store switch
///
/// Selected once at composition time from [`AuthConfig`]; the manager never
/// branches on environment state itself.
pub enum BackingStore<K: KeyValueStore> {
    Remote(PgUserStore),
    Fallback(KvUserStore<K>),
}

impl<K: KeyValueStore> BackingStore<K> {
    /// Build the store the configuration selects
    ///
    /// Remote mode connects the pool here, once; fallback mode reuses the
    /// injected key-value capability.
    pub async fn from_config(config: &AuthConfig, kv: Arc<K>) -> AuthResult<Self> {
        if config.is_remote() {
            let pool = config.connect().await?;
            Ok(BackingStore::Remote(PgUserStore::new(pool)))
        } else {
            tracing::warn!("DATABASE_URL is not set, using client-local fallback store");
            Ok(BackingStore::Fallback(KvUserStore::new(
                kv,
                &config.users_key,
            )))
        }
    }
}

impl<K: KeyValueStore> UserStore for BackingStore<K> {
    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>> {
        match self {
            BackingStore::Remote(store) => store.find_by_id(id).await,
            BackingStore::Fallback(store) => store.find_by_id(id).await,
        }
    }

    async fn find_credential_by_username(
        &self,
        username: &str,
    ) -> AuthResult<Option<(User, Secret)>> {
        match self {
            BackingStore::Remote(store) => store.find_credential_by_username(username).await,
            BackingStore::Fallback(store) => store.find_credential_by_username(username).await,
        }
    }

    async fn find_id_by_username(&self, username: &str) -> AuthResult<Option<UserId>> {
        match self {
            BackingStore::Remote(store) => store.find_id_by_username(username).await,
            BackingStore::Fallback(store) => store.find_id_by_username(username).await,
        }
    }

    async fn insert(&self, user: &User, password: &str) -> AuthResult<()> {
        match self {
            BackingStore::Remote(store) => store.insert(user, password).await,
            BackingStore::Fallback(store) => store.insert(user, password).await,
        }
    }

    async fn update_secret(&self, id: &UserId, password: &str) -> AuthResult<()> {
        match self {
            BackingStore::Remote(store) => store.update_secret(id, password).await,
            BackingStore::Fallback(store) => store.update_secret(id, password).await,
        }
    }
}
