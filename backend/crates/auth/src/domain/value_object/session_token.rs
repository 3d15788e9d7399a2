//! Session Token Value Object
//!
//! Opaque bearer credential handed to the client in the session cookie.
//! The token carries no structure the server relies on: it is only ever
//! used as a lookup key in the session store.

use std::fmt;

/// Opaque session token
///
/// `Debug` prints a short fingerprint instead of the secret, so tokens can
/// travel through `tracing` fields without leaking.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token value (freshly generated or read from a cookie)
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw value, for the Set-Cookie header only
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Log-safe fingerprint of the token
    pub fn fingerprint(&self) -> String {
        platform::crypto::log_fingerprint(self.0.as_bytes())
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({})", self.fingerprint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_does_not_leak_value() {
        let token = SessionToken::new("super-secret-token-value");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("super-secret"));
        assert_eq!(debug, format!("SessionToken({})", token.fingerprint()));
    }

    #[test]
    fn test_equality_by_value() {
        assert_eq!(SessionToken::new("abc"), SessionToken::from("abc".to_string()));
        assert_ne!(SessionToken::new("abc"), SessionToken::new("abd"));
    }
}
