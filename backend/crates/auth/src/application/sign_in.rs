//! Sign In Use Case
//!
//! Verifies credentials and issues a new session.

use std::sync::Arc;

use kernel::error::app_error::AppError;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::entity::session_record::IssuedSession;
use crate::domain::repository::{CredentialVerifier, SessionStore};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// Sign in input
///
/// Missing fields decode as empty strings and then fail verification; only
/// bodies that are not a JSON object of strings are malformed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl SignInInput {
    /// Decode a JSON request body
    ///
    /// Only a JSON object is accepted. Arrays, scalars and `null` are malformed.
    pub fn from_json(body: &[u8]) -> AuthResult<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| AuthError::from(AppError::from(e)))?;
        if !value.is_object() {
            return Err(AuthError::MalformedRequest(
                "Expected a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| AuthError::from(AppError::from(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_object() {
        let input = SignInInput::from_json(br#"{"username":"user1","password":"password1"}"#)
            .unwrap();
        assert_eq!(input.username, "user1");
        assert_eq!(input.password, "password1");
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        for body in [
            &b"[]"[..],
            br#"["user1","password1"]"#,
            br#""x""#,
            b"42",
            b"null",
        ] {
            let err = SignInInput::from_json(body).unwrap_err();
            assert!(matches!(err, AuthError::MalformedRequest(_)), "{err:?}");
        }
    }

    #[test]
    fn test_from_json_rejects_wrong_field_type() {
        let err = SignInInput::from_json(br#"{"username":1,"password":"x"}"#).unwrap_err();
        assert!(matches!(err, AuthError::MalformedRequest(_)));
    }
}

/// Sign in use case
pub struct SignInUseCase<S, V>
where
    S: SessionStore,
    V: CredentialVerifier,
{
    session_store: Arc<S>,
    verifier: Arc<V>,
}

impl<S, V> SignInUseCase<S, V>
where
    S: SessionStore,
    V: CredentialVerifier,
{
    pub fn new(session_store: Arc<S>, verifier: Arc<V>) -> Self {
        Self {
            session_store,
            verifier,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<IssuedSession> {
        let user_name =
            UserName::new(&input.username).map_err(|_| AuthError::InvalidCredentials)?;

        if !self.verifier.verify(user_name.as_str(), &input.password).await {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.session_store.create(&user_name).await?;

        tracing::info!(
            user_name = %user_name,
            session = %issued.token.fingerprint(),
            expires_at = %issued.expires_at,
            "User signed in"
        );

        Ok(issued)
    }
}
