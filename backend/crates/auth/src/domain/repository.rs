//! Store Trait
//!
//! Interface for identity/credential persistence. Implementations live in
//! the infrastructure layer: a remote relational store and a client-local
//! fallback store behind the same capability set.

use crate::domain::entity::user::User;
use crate::domain::value_object::{secret::Secret, user_id::UserId};
use crate::error::AuthResult;

/// Identity + credential store trait
///
/// Secret encoding is the store's concern: the remote store seals passwords
/// with Argon2id, the fallback store keeps them plaintext. Verification
/// happens caller-side through [`Secret::verify`].
#[trait_variant::make(UserStore: Send)]
pub trait LocalUserStore {
    /// Find a user by ID, without credential material
    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>>;

    /// Find a user and their stored secret by exact username match
    async fn find_credential_by_username(
        &self,
        username: &str,
    ) -> AuthResult<Option<(User, Secret)>>;

    /// Find a user ID by exact username match (duplicate check)
    async fn find_id_by_username(&self, username: &str) -> AuthResult<Option<UserId>>;

    /// Persist a new user with a sealed secret derived from `password`
    async fn insert(&self, user: &User, password: &str) -> AuthResult<()>;

    /// Replace the stored secret and bump the last-password-change timestamp
    async fn update_secret(&self, id: &UserId, password: &str) -> AuthResult<()>;
}
