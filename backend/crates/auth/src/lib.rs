//! Auth (Session & Credential) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store trait
//! - `application/` - Configuration and the session manager
//! - `infra/` - Store implementations (PostgreSQL, client-local fallback)
//!
//! ## Features
//! - Session bootstrap from a persisted pointer
//! - Username + password login against the configured store
//! - Self-registration (role fixed to `user`)
//! - Password change with short-circuit policy checks
//!
//! ## Storage Model
//! - Remote mode (when `DATABASE_URL` is set): PostgreSQL, Argon2id-hashed
//!   secrets
//! - Fallback mode: JSON records in an injected key-value capability,
//!   plaintext secrets (a documented weakness of the fallback, not a
//!   design goal)
//!
//! ## Wiring
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use auth::{AuthConfig, BackingStore, SessionManager};
//! use platform::kv::FileKvStore;
//!
//! # async fn wire() -> Result<(), auth::AuthError> {
//! let config = Arc::new(AuthConfig::from_env());
//! let kv = Arc::new(FileKvStore::new("local_store.json"));
//! let store = Arc::new(BackingStore::from_config(&config, kv.clone()).await?);
//!
//! let mut session = SessionManager::new(store, kv, config);
//! session.restore_session().await;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session::{Outcome, RegisterRequest, SessionManager};
pub use domain::entity::user::User;
pub use domain::repository::UserStore;
pub use domain::value_object::{secret::Secret, user_id::UserId, user_role::UserRole};
pub use error::{AuthError, AuthResult};
pub use infra::{BackingStore, KvUserStore, PgUserStore};
