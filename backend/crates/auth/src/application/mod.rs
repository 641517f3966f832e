//! Application Layer
//!
//! Configuration and the session & credential manager.

pub mod config;
pub mod session;

// Re-exports
pub use config::AuthConfig;
pub use session::{Outcome, RegisterRequest, SessionManager};
