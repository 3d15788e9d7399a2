//! Session Lifecycle
//!
//! The four client-facing operations, wired to one store and one verifier.
//!
//! ```text
//!              sign_in ok                 refresh ok (new token)
//! [Anonymous] ────────────→ [Authenticated] ─────────────┐
//!      ↑                        │    ↑                   │
//!      │  sign_out / expiry /   │    └───────────────────┘
//!      └────── unknown token ───┘
//! ```
//!
//! There is no pending state: a client is authenticated exactly when the
//! token it presents resolves to a live record.

use std::sync::Arc;

use crate::application::{RefreshUseCase, SignInInput, SignInUseCase, SignOutUseCase, WelcomeUseCase};
use crate::domain::entity::session_record::IssuedSession;
use crate::domain::repository::{CredentialVerifier, SessionStore};
use crate::domain::value_object::{session_token::SessionToken, user_name::UserName};
use crate::error::AuthResult;

/// Session lifecycle service
pub struct SessionLifecycle<S, V>
where
    S: SessionStore,
    V: CredentialVerifier,
{
    session_store: Arc<S>,
    verifier: Arc<V>,
}

impl<S, V> Clone for SessionLifecycle<S, V>
where
    S: SessionStore,
    V: CredentialVerifier,
{
    fn clone(&self) -> Self {
        Self {
            session_store: self.session_store.clone(),
            verifier: self.verifier.clone(),
        }
    }
}

impl<S, V> SessionLifecycle<S, V>
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

    /// Decode a JSON credentials body and sign in
    ///
    /// A body that does not decode is rejected before the store is touched.
    pub async fn sign_in(&self, body: &[u8]) -> AuthResult<IssuedSession> {
        let input = SignInInput::from_json(body)?;
        SignInUseCase::new(self.session_store.clone(), self.verifier.clone())
            .execute(input)
            .await
    }

    pub async fn welcome(&self, token: Option<&SessionToken>) -> AuthResult<UserName> {
        WelcomeUseCase::new(self.session_store.clone())
            .execute(token)
            .await
    }

    pub async fn refresh(&self, token: Option<&SessionToken>) -> AuthResult<IssuedSession> {
        RefreshUseCase::new(self.session_store.clone())
            .execute(token)
            .await
    }

    pub async fn sign_out(&self, token: Option<&SessionToken>) {
        SignOutUseCase::new(self.session_store.clone())
            .execute(token)
            .await
    }
}
