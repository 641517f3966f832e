//! Auth Error Types
//!
//! Two failure families cross this module's boundary (never as panics):
//! policy rejections, whose `Display` strings are the messages callers show,
//! and infrastructure failures, which the public operations log and downgrade
//! to the nearest policy-shaped result.

use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No identity matches the session's user
    #[error("user not found")]
    UserNotFound,

    /// Username already exists in the active store
    #[error("username already in use")]
    UsernameTaken,

    /// Old password does not match the stored secret
    #[error("old password incorrect")]
    OldPasswordIncorrect,

    /// New password below the minimum length
    #[error("new password must be at least 6 characters")]
    PasswordTooShort,

    /// New password equals the old one
    #[error("new password must differ from old password")]
    PasswordUnchanged,

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Client-local store error
    #[error("local store error: {0}")]
    Storage(#[from] platform::kv::KvError),

    /// Fallback record (de)serialization error
    #[error("record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Password hashing error
    #[error("hashing error: {0}")]
    Hashing(#[from] platform::password::PasswordHashError),
}

impl AuthError {
    /// Whether this is a policy rejection (message is caller-facing)
    /// rather than an infrastructure failure.
    pub fn is_policy(&self) -> bool {
        matches!(
            self,
            AuthError::UserNotFound
                | AuthError::UsernameTaken
                | AuthError::OldPasswordIncorrect
                | AuthError::PasswordTooShort
                | AuthError::PasswordUnchanged
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_messages() {
        assert_eq!(AuthError::UserNotFound.to_string(), "user not found");
        assert_eq!(
            AuthError::UsernameTaken.to_string(),
            "username already in use"
        );
        assert_eq!(
            AuthError::OldPasswordIncorrect.to_string(),
            "old password incorrect"
        );
        assert_eq!(
            AuthError::PasswordTooShort.to_string(),
            "new password must be at least 6 characters"
        );
        assert_eq!(
            AuthError::PasswordUnchanged.to_string(),
            "new password must differ from old password"
        );
    }

    #[test]
    fn test_policy_classification() {
        assert!(AuthError::UserNotFound.is_policy());
        assert!(AuthError::UsernameTaken.is_policy());
        assert!(!AuthError::Database(sqlx::Error::PoolClosed).is_policy());
    }
}
