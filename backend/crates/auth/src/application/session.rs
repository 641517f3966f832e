//! Session & Credential Manager
//!
//! Owns the current authenticated identity for a client and mutates
//! credential/session state: session restoration, login, registration,
//! logout, and password change.
//!
//! The manager is parameterized over an injected [`UserStore`] (remote or
//! fallback) and an injected [`KeyValueStore`] holding the persisted session
//! pointer. One manager instance exists per client context; operations run
//! one at a time, so there is no internal locking.
//!
//! Failures split two ways: policy rejections come back as `false` or a
//! structured [`Outcome`], while backing-store failures are logged and
//! downgraded to the nearest policy-shaped result. No operation here is
//! fatal to the process.

use std::sync::Arc;

use platform::kv::KeyValueStore;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserStore;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Minimum length for a new password, in characters
pub const MIN_NEW_PASSWORD_CHARS: usize = 6;

/// Registration input
///
/// Transient: consumed to create an identity plus sealed secret, never
/// persisted as-is.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    /// Group/ward tag
    pub rw: String,
}

/// Structured result of `register` and `change_password`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Session & credential manager
pub struct SessionManager<S, K>
where
    S: UserStore,
    K: KeyValueStore,
{
    store: Arc<S>,
    session_kv: Arc<K>,
    config: Arc<AuthConfig>,
    current: Option<User>,
}

impl<S, K> SessionManager<S, K>
where
    S: UserStore,
    K: KeyValueStore,
{
    pub fn new(store: Arc<S>, session_kv: Arc<K>, config: Arc<AuthConfig>) -> Self {
        Self {
            store,
            session_kv,
            config,
            current: None,
        }
    }

    /// The currently authenticated identity, if any
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Restore the session from the persisted pointer
    ///
    /// Invoked once at startup. Never fails visibly: lookup errors are
    /// treated the same as "not found" and clear the stale pointer.
    pub async fn restore_session(&mut self) {
        let pointer = match self.session_kv.get(&self.config.session_key) {
            Ok(pointer) => pointer,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read session pointer");
                return;
            }
        };
        let Some(pointer) = pointer else {
            return;
        };

        let id: UserId = match pointer.parse() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed session pointer, clearing");
                self.clear_pointer();
                return;
            }
        };

        match self.store.find_by_id(&id).await {
            Ok(Some(mut user)) => {
                // Restored sessions are already authenticated; password age
                // is not re-checked.
                user.must_change_password = false;
                tracing::info!(user_id = %user.id, username = %user.username, "Session restored");
                self.current = Some(user);
            }
            Ok(None) => {
                tracing::info!(user_id = %id, "Session pointer references a missing user, clearing");
                self.clear_pointer();
            }
            Err(e) => {
                tracing::error!(error = %e, "Session restore lookup failed, clearing pointer");
                self.clear_pointer();
            }
        }
    }

    /// Authenticate by username and password
    ///
    /// The return value strictly reflects whether the current identity was
    /// set during this call. Store failures are logged and reported as a
    /// plain `false`, indistinguishable from wrong credentials.
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        match self.try_login(username, password).await {
            Ok(Some(user)) => {
                tracing::info!(user_id = %user.id, username = %user.username, "User logged in");
                self.current = Some(user);
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::error!(error = %e, "Login lookup failed");
                false
            }
        }
    }

    async fn try_login(&self, username: &str, password: &str) -> AuthResult<Option<User>> {
        let Some((mut user, secret)) = self.store.find_credential_by_username(username).await?
        else {
            return Ok(None);
        };

        if !secret.verify(password) {
            return Ok(None);
        }

        user.must_change_password = false;
        self.persist_pointer(&user.id);
        Ok(Some(user))
    }

    /// Register a new identity with role fixed to `user`
    ///
    /// Does not log the new identity in. The duplicate check runs
    /// immediately before the insert, not inside a transaction; the race
    /// between check and insert is an accepted limitation.
    pub async fn register(&self, request: RegisterRequest) -> Outcome {
        match self.try_register(request).await {
            Ok(()) => Outcome::ok("registration succeeded"),
            Err(e) => reject(e, "registration failed"),
        }
    }

    async fn try_register(&self, request: RegisterRequest) -> AuthResult<()> {
        if self
            .store
            .find_id_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameTaken);
        }

        let user = User::new(request.username, request.name, Some(request.rw));
        self.store.insert(&user, &request.password).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(())
    }

    /// Clear the current identity and the persisted pointer
    ///
    /// No user-store interaction; always completes.
    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            tracing::info!(user_id = %user.id, "User logged out");
        }
        self.clear_pointer();
    }

    /// Change the current identity's password
    ///
    /// Short-circuits on the first failed check; each check carries its own
    /// message. On success the in-memory must-change-password flag is
    /// cleared alongside the stored secret.
    pub async fn change_password(&mut self, old_password: &str, new_password: &str) -> Outcome {
        match self.try_change_password(old_password, new_password).await {
            Ok(()) => Outcome::ok("password changed"),
            Err(e) => reject(e, "password change failed"),
        }
    }

    async fn try_change_password(&mut self, old_password: &str, new_password: &str) -> AuthResult<()> {
        let current = self.current.as_ref().ok_or(AuthError::UserNotFound)?;

        let (_, secret) = self
            .store
            .find_credential_by_username(&current.username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !secret.verify(old_password) {
            return Err(AuthError::OldPasswordIncorrect);
        }
        if new_password.chars().count() < MIN_NEW_PASSWORD_CHARS {
            return Err(AuthError::PasswordTooShort);
        }
        if new_password == old_password {
            return Err(AuthError::PasswordUnchanged);
        }

        let id = current.id;
        self.store.update_secret(&id, new_password).await?;

        if let Some(user) = self.current.as_mut() {
            user.record_password_change();
        }

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    fn persist_pointer(&self, id: &UserId) {
        if let Err(e) = self
            .session_kv
            .set(&self.config.session_key, &id.to_string())
        {
            tracing::warn!(error = %e, "Failed to persist session pointer");
        }
    }

    fn clear_pointer(&self) {
        if let Err(e) = self.session_kv.remove(&self.config.session_key) {
            tracing::warn!(error = %e, "Failed to clear session pointer");
        }
    }
}

/// Map an error to a caller-facing outcome
///
/// Policy rejections carry their own message; store failures are logged and
/// collapsed into the operation's generic rejection.
fn reject(error: AuthError, infra_message: &str) -> Outcome {
    if error.is_policy() {
        Outcome::rejected(error.to_string())
    } else {
        tracing::error!(error = %error, "Backing store failure");
        Outcome::rejected(infra_message)
    }
}
