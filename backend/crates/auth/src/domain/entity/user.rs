//! User Entity
//!
//! The authenticated principal. Credential material is never part of this
//! entity; it stays behind the store boundary as a `Secret`.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Opaque identifier (UUID v4, generated locally)
    pub id: UserId,
    /// Username (unique, case-sensitive, no format constraints)
    pub username: String,
    /// Display name
    pub name: String,
    /// Role; self-registration always yields `user`
    pub role: UserRole,
    /// Group/ward tag (the community's "RW" neighborhood unit)
    pub rw: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Transient flag: password must be changed before normal use.
    /// Forced false on login and session restoration.
    pub must_change_password: bool,
    /// Last password change time
    pub last_password_change: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new self-registered user
    pub fn new(username: impl Into<String>, name: impl Into<String>, rw: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            name: name.into(),
            role: UserRole::User,
            rw,
            created_at: Utc::now(),
            must_change_password: false,
            last_password_change: None,
        }
    }

    /// Record a completed password change
    pub fn record_password_change(&mut self) {
        self.must_change_password = false;
        self.last_password_change = Some(Utc::now());
    }
}
