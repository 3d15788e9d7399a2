//! Static Credential Verifier
//!
//! Fixed in-memory identity table. Stands in for a real identity backend.

use std::collections::HashMap;

use platform::crypto::{constant_time_eq, sha256};

use crate::domain::repository::CredentialVerifier;

/// Verifier over a fixed username -> password table
///
/// Passwords are kept as SHA-256 digests so every comparison runs over the
/// same 32 bytes in constant time. This is not password storage hardening.
#[derive(Debug, Clone)]
pub struct StaticCredentialVerifier {
    users: HashMap<String, [u8; 32]>,
}

impl StaticCredentialVerifier {
    pub fn new<I, U, P>(users: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: AsRef<[u8]>,
    {
        Self {
            users: users
                .into_iter()
                .map(|(user, password)| (user.into(), sha256(password.as_ref())))
                .collect(),
        }
    }

    /// The demo table: `user1/password1`, `user2/password2`
    pub fn demo() -> Self {
        Self::new([("user1", "password1"), ("user2", "password2")])
    }
}

impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, username: &str, password: &str) -> bool {
        let presented = sha256(password.as_bytes());
        let expected = self.users.get(username);

        // Unknown users still pay for a full comparison
        let reference = expected.copied().unwrap_or([0u8; 32]);
        let matches = constant_time_eq(&reference, &presented);

        expected.is_some() & matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_users() {
        let verifier = StaticCredentialVerifier::demo();

        assert!(verifier.verify("user1", "password1").await);
        assert!(verifier.verify("user2", "password2").await);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let verifier = StaticCredentialVerifier::demo();

        assert!(!verifier.verify("user1", "password2").await);
        assert!(!verifier.verify("user1", "").await);
        assert!(!verifier.verify("user1", "password1 ").await);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let verifier = StaticCredentialVerifier::demo();

        assert!(!verifier.verify("user3", "password1").await);
        assert!(!verifier.verify("", "").await);
    }

    #[tokio::test]
    async fn test_custom_table() {
        let verifier = StaticCredentialVerifier::new(vec![("alice".to_string(), b"s3cret".to_vec())]);

        assert!(verifier.verify("alice", "s3cret").await);
        assert!(!verifier.verify("user1", "password1").await);
    }
}
