//! Value Object Module

pub mod secret;
pub mod user_id;
pub mod user_role;
