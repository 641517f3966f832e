//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, PHC string storage)
//! - Key-value persistence capability (file-backed and in-memory)

pub mod kv;
pub mod password;
