//! Welcome Use Case
//!
//! Resolves a presented session token to the subject it authenticates.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::repository::SessionStore;
use crate::domain::value_object::{session_token::SessionToken, user_name::UserName};
use crate::error::{AuthError, AuthResult, SessionRejection};

/// Welcome use case
pub struct WelcomeUseCase<S>
where
    S: SessionStore,
{
    session_store: Arc<S>,
}

impl<S> WelcomeUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_store: Arc<S>) -> Self {
        Self { session_store }
    }

    /// Missing, unknown and expired tokens all fail the same way
    pub async fn execute(&self, token: Option<&SessionToken>) -> AuthResult<UserName> {
        let token = token.ok_or(AuthError::Unauthenticated(SessionRejection::MissingToken))?;

        let record = self
            .session_store
            .get(token)
            .await
            .ok_or(AuthError::Unauthenticated(SessionRejection::NotFound))?;

        tracing::debug!(
            user_name = %record.subject,
            session = %token.fingerprint(),
            remaining_ms = record.remaining_ms(Utc::now()),
            "Session resolved"
        );

        Ok(record.subject)
    }
}
