//! Application Configuration
//!
//! Store-mode selection for the auth application layer: presence of
//! `DATABASE_URL` in the process environment selects the remote store,
//! absence selects the client-local fallback. The pool is built once here
//! and handed to the store at composition time.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;

use crate::error::{AuthError, AuthResult};

/// Fixed key holding the persisted session pointer
pub const SESSION_POINTER_KEY: &str = "auth_user_id";

/// Fixed key holding the fallback user records
pub const USER_RECORDS_KEY: &str = "registered_users";

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Remote store connection string; `None` selects the fallback store
    pub database_url: Option<String>,
    /// Key-value key for the session pointer
    pub session_key: String,
    /// Key-value key for fallback user records
    pub users_key: String,
    /// Remote pool size
    pub max_connections: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            session_key: SESSION_POINTER_KEY.to_string(),
            users_key: USER_RECORDS_KEY.to_string(),
            max_connections: 5,
        }
    }
}

impl AuthConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").ok(),
            ..Default::default()
        }
    }

    /// Whether the remote store is configured
    pub fn is_remote(&self) -> bool {
        self.database_url.is_some()
    }

    /// Build the remote connection pool
    ///
    /// Call once at startup and pass the pool into the store; the pool is
    /// the single reused handle for the life of the process.
    pub async fn connect(&self) -> AuthResult<PgPool> {
        let url = self.database_url.as_deref().ok_or_else(|| {
            AuthError::Database(sqlx::Error::Configuration(
                "DATABASE_URL is not set".into(),
            ))
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(url)
            .await?;

        tracing::info!("Connected to database");
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_fallback() {
        let config = AuthConfig::default();
        assert!(!config.is_remote());
        assert_eq!(config.session_key, "auth_user_id");
        assert_eq!(config.users_key, "registered_users");
    }

    #[test]
    fn test_url_selects_remote_mode() {
        let config = AuthConfig {
            database_url: Some("postgres://localhost/warga".to_string()),
            ..Default::default()
        };
        assert!(config.is_remote());
    }

    #[tokio::test]
    async fn test_connect_without_url_fails() {
        let config = AuthConfig::default();
        assert!(config.connect().await.is_err());
    }
}
