//! Domain Layer
//!
//! Contains entities, value objects, and the store trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::User;
pub use repository::UserStore;
pub use value_object::{secret::Secret, user_id::UserId, user_role::UserRole};
