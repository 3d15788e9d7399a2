//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::domain::repository::SessionStore;
use crate::domain::value_object::session_token::SessionToken;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionStore,
{
    session_store: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionStore,
{
    pub fn new(session_store: Arc<S>) -> Self {
        Self { session_store }
    }

    /// Sign out from the presented session
    ///
    /// Never fails: unknown, expired or absent tokens are already signed out.
    pub async fn execute(&self, token: Option<&SessionToken>) {
        match token {
            Some(token) => {
                self.session_store.revoke(token).await;
                tracing::info!(session = %token.fingerprint(), "User signed out");
            }
            None => {
                tracing::debug!("Sign out without session cookie");
            }
        }
    }
}
