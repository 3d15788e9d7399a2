//! Refresh Use Case
//!
//! Rotates a live session onto a new token with a fresh TTL.

use std::sync::Arc;

use crate::domain::entity::session_record::IssuedSession;
use crate::domain::repository::SessionStore;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::{AuthError, AuthResult, SessionRejection};

/// Refresh use case
pub struct RefreshUseCase<S>
where
    S: SessionStore,
{
    session_store: Arc<S>,
}

impl<S> RefreshUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_store: Arc<S>) -> Self {
        Self { session_store }
    }

    /// The presented token is dead once this returns `Ok`
    ///
    /// Every store failure surfaces as `Unauthenticated`.
    pub async fn execute(&self, token: Option<&SessionToken>) -> AuthResult<IssuedSession> {
        let token = token.ok_or(AuthError::Unauthenticated(SessionRejection::MissingToken))?;

        let issued = self
            .session_store
            .rotate(token)
            .await
            .map_err(|e| match e {
                rejected @ AuthError::Unauthenticated(_) => rejected,
                other => {
                    tracing::error!(
                        session = %token.fingerprint(),
                        error = %other,
                        "Session rotation failed"
                    );
                    AuthError::Unauthenticated(SessionRejection::RotationFailed)
                }
            })?;

        tracing::info!(
            old_session = %token.fingerprint(),
            session = %issued.token.fingerprint(),
            expires_at = %issued.expires_at,
            "Session rotated"
        );

        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::domain::services::TokenGenerator;
    use crate::domain::value_object::user_name::UserName;
    use crate::infra::InMemorySessionStore;

    /// Hands out the same token every time
    struct FixedGenerator;

    impl TokenGenerator for FixedGenerator {
        fn generate(&self) -> SessionToken {
            SessionToken::new("fixed")
        }
    }

    #[tokio::test]
    async fn test_exhausted_rotation_is_unauthenticated() {
        let store = Arc::new(
            InMemorySessionStore::with_generator(Duration::from_secs(120), FixedGenerator)
                .unwrap(),
        );
        let issued = store
            .create(&UserName::new("user1").unwrap())
            .await
            .unwrap();

        let err = RefreshUseCase::new(store.clone())
            .execute(Some(&issued.token))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AuthError::Unauthenticated(SessionRejection::RotationFailed)
        ));
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
        // the presented session survives a failed rotation
        assert!(store.get(&issued.token).await.is_some());
    }

    #[tokio::test]
    async fn test_unknown_token_keeps_its_reason() {
        let store = Arc::new(InMemorySessionStore::new(Duration::from_secs(120)).unwrap());

        let err = RefreshUseCase::new(store)
            .execute(Some(&SessionToken::new("never-issued")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AuthError::Unauthenticated(SessionRejection::NotFound)
        ));
    }
}
