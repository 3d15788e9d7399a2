//! Repository Traits
//!
//! Interfaces for session state and identity lookup. Implementations are in
//! the infrastructure layer.

use crate::domain::entity::session_record::{IssuedSession, SessionRecord};
use crate::domain::value_object::{session_token::SessionToken, user_name::UserName};
use crate::error::AuthResult;

/// Session store trait
///
/// The store is the only shared mutable state in the service. Every method
/// is atomic with respect to every other method on the same token.
#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    /// Insert a live record for `subject` under a fresh token
    async fn create(&self, subject: &UserName) -> AuthResult<IssuedSession>;

    /// Find the live record for `token`
    ///
    /// An expired record is evicted by this call and reported as absent.
    async fn get(&self, token: &SessionToken) -> Option<SessionRecord>;

    /// Replace the record under `token` with a new one for the same subject
    ///
    /// The old token is gone once this returns `Ok`. When two callers race
    /// on one token, exactly one of them succeeds.
    async fn rotate(&self, token: &SessionToken) -> AuthResult<IssuedSession>;

    /// Remove `token` if present (idempotent)
    async fn revoke(&self, token: &SessionToken);

    /// Remove every expired record, returning how many were removed
    async fn purge_expired(&self) -> usize;
}

/// Credential verifier trait
///
/// Identity backends plug in here; the lifecycle never sees how
/// credentials are stored.
#[trait_variant::make(CredentialVerifier: Send)]
pub trait LocalCredentialVerifier {
    /// Check a username/password pair
    async fn verify(&self, username: &str, password: &str) -> bool;
}
