//! Client-Local Fallback Store
//!
//! Used only when no remote store is configured. Keeps an ordered JSON list
//! of user records under a fixed key in the injected key-value capability.
//! Secrets are stored plaintext here: a documented weakness of the fallback
//! mode, not a design goal.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use platform::kv::KeyValueStore;
use platform::password::PlainSecret;

use crate::domain::entity::user::User;
use crate::domain::repository::UserStore;
use crate::domain::value_object::{secret::Secret, user_id::UserId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Fallback user store over a key-value capability
pub struct KvUserStore<K: KeyValueStore> {
    kv: Arc<K>,
    users_key: String,
}

impl<K: KeyValueStore> KvUserStore<K> {
    pub fn new(kv: Arc<K>, users_key: impl Into<String>) -> Self {
        Self {
            kv,
            users_key: users_key.into(),
        }
    }

    fn load(&self) -> AuthResult<Vec<UserRecord>> {
        match self.kv.get(&self.users_key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[UserRecord]) -> AuthResult<()> {
        let raw = serde_json::to_string(records)?;
        self.kv.set(&self.users_key, &raw)?;
        Ok(())
    }
}

impl<K: KeyValueStore> UserStore for KvUserStore<K> {
    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>> {
        // Secret stays behind; only the profile leaves the store.
        Ok(self
            .load()?
            .into_iter()
            .find(|r| r.id == *id)
            .map(UserRecord::into_user))
    }

    async fn find_credential_by_username(
        &self,
        username: &str,
    ) -> AuthResult<Option<(User, Secret)>> {
        Ok(self
            .load()?
            .into_iter()
            .find(|r| r.username == username)
            .map(|r| {
                let secret = Secret::Plain(PlainSecret::new(r.password.clone()));
                (r.into_user(), secret)
            }))
    }

    async fn find_id_by_username(&self, username: &str) -> AuthResult<Option<UserId>> {
        Ok(self
            .load()?
            .iter()
            .find(|r| r.username == username)
            .map(|r| r.id))
    }

    async fn insert(&self, user: &User, password: &str) -> AuthResult<()> {
        let mut records = self.load()?;
        records.push(UserRecord::from_user(user, password));
        self.save(&records)
    }

    async fn update_secret(&self, id: &UserId, password: &str) -> AuthResult<()> {
        let mut records = self.load()?;
        let record = records
            .iter_mut()
            .find(|r| r.id == *id)
            .ok_or(AuthError::UserNotFound)?;

        record.password = password.to_string();
        record.last_password_change = Some(Utc::now());
        self.save(&records)
    }
}

/// Persisted fallback record (plaintext secret)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    id: UserId,
    username: String,
    password: String,
    name: String,
    role: UserRole,
    #[serde(default)]
    rw: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    last_password_change: Option<DateTime<Utc>>,
}

impl UserRecord {
    fn from_user(user: &User, password: &str) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            password: password.to_string(),
            name: user.name.clone(),
            role: user.role,
            rw: user.rw.clone(),
            created_at: user.created_at,
            last_password_change: user.last_password_change,
        }
    }

    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            name: self.name,
            role: self.role,
            rw: self.rw,
            created_at: self.created_at,
            must_change_password: false,
            last_password_change: self.last_password_change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::kv::MemoryKvStore;

    fn store() -> KvUserStore<MemoryKvStore> {
        KvUserStore::new(Arc::new(MemoryKvStore::new()), "registered_users")
    }

    #[tokio::test]
    async fn test_insert_and_find_roundtrip() {
        let store = store();
        let user = User::new("rw01", "Budi", Some("01".to_string()));
        store.insert(&user, "secret1").await.unwrap();

        let found = store.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(found.username, "rw01");
        assert_eq!(found.name, "Budi");
        assert_eq!(found.rw.as_deref(), Some("01"));
        assert_eq!(found.role, UserRole::User);

        let id = store.find_id_by_username("rw01").await.unwrap();
        assert_eq!(id, Some(user.id));
        assert_eq!(store.find_id_by_username("rw02").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_credential_verifies_plaintext() {
        let store = store();
        let user = User::new("rw01", "Budi", None);
        store.insert(&user, "secret1").await.unwrap();

        let (_, secret) = store
            .find_credential_by_username("rw01")
            .await
            .unwrap()
            .unwrap();
        assert!(secret.verify("secret1"));
        assert!(!secret.verify("secret2"));
    }

    #[tokio::test]
    async fn test_update_secret_replaces_and_timestamps() {
        let store = store();
        let user = User::new("rw01", "Budi", None);
        store.insert(&user, "secret1").await.unwrap();

        store.update_secret(&user.id, "secret2").await.unwrap();

        let (found, secret) = store
            .find_credential_by_username("rw01")
            .await
            .unwrap()
            .unwrap();
        assert!(secret.verify("secret2"));
        assert!(!secret.verify("secret1"));
        assert!(found.last_password_change.is_some());
    }

    #[tokio::test]
    async fn test_update_secret_missing_user() {
        let store = store();
        let result = store.update_secret(&UserId::new(), "secret2").await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_records_survive_reload() {
        let kv = Arc::new(MemoryKvStore::new());
        let user = User::new("rw01", "Budi", Some("01".to_string()));
        {
            let store = KvUserStore::new(kv.clone(), "registered_users");
            store.insert(&user, "secret1").await.unwrap();
        }

        let reopened = KvUserStore::new(kv, "registered_users");
        let found = reopened.find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(found.username, "rw01");
    }
}
