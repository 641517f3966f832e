//! Credential Secret
//!
//! The password-derived value checked at login. The remote store keeps an
//! Argon2id hash; the local fallback store keeps plaintext (a known weakness
//! of the fallback, kept for behavioral parity). Only comparison results
//! leave the module boundary.

use platform::password::{HashedPassword, PlainSecret};

/// Stored credential secret, in the active store's encoding
#[derive(Debug, Clone)]
pub enum Secret {
    /// Argon2id PHC hash (remote store)
    Argon2(HashedPassword),
    /// Plaintext (local fallback store)
    Plain(PlainSecret),
}

impl Secret {
    /// Verify a candidate password under this secret's comparison rule
    pub fn verify(&self, candidate: &str) -> bool {
        match self {
            Secret::Argon2(hash) => hash.verify(candidate),
            Secret::Plain(plain) => plain.matches(candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_secret_verify() {
        let secret = Secret::Plain(PlainSecret::new("secret1"));
        assert!(secret.verify("secret1"));
        assert!(!secret.verify("secret2"));
    }

    #[test]
    fn test_hashed_secret_verify() {
        let secret = Secret::Argon2(HashedPassword::hash("secret1").unwrap());
        assert!(secret.verify("secret1"));
        assert!(!secret.verify("secret2"));
    }

    #[test]
    fn test_debug_never_leaks_plaintext() {
        let secret = Secret::Plain(PlainSecret::new("super-sensitive"));
        assert!(!format!("{:?}", secret).contains("super-sensitive"));
    }
}
