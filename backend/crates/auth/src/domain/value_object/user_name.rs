//! User Name Value Object
//!
//! The subject a session is bound to. The credential backend owns the real
//! naming rules; this type only rejects input that could never name a user
//! and would be unsafe to echo back (empty, oversized, control characters).

use derive_more::Display;
use thiserror::Error;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserNameError {
    #[error("User name is empty")]
    Empty,
    #[error("User name is too long")]
    TooLong,
    #[error("User name contains control characters")]
    ControlCharacter,
}

/// Authenticated subject identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct UserName(String);

impl UserName {
    pub fn new(value: &str) -> Result<Self, UserNameError> {
        if value.is_empty() {
            return Err(UserNameError::Empty);
        }
        if value.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong);
        }
        if value.chars().any(char::is_control) {
            return Err(UserNameError::ControlCharacter);
        }
        Ok(Self(value.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_name() {
        let name = UserName::new("user1").unwrap();
        assert_eq!(name.as_str(), "user1");
        assert_eq!(name.to_string(), "user1");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
    }

    #[test]
    fn test_length_limit_counts_chars() {
        let at_limit = "é".repeat(USER_NAME_MAX_LENGTH);
        assert!(UserName::new(&at_limit).is_ok());

        let over = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert_eq!(UserName::new(&over), Err(UserNameError::TooLong));
    }

    #[test]
    fn test_rejects_control_characters() {
        assert_eq!(
            UserName::new("user1\r\nSet-Cookie: x"),
            Err(UserNameError::ControlCharacter)
        );
        assert_eq!(UserName::new("user\0"), Err(UserNameError::ControlCharacter));
    }
}
