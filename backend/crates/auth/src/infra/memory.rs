//! In-Memory Session Store
//!
//! Process-local session state behind a single `RwLock`. Live lookups share
//! the read lock; anything that inserts or removes takes the write lock and
//! re-checks expiry under it, so check-and-act is atomic per token.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::session_record::{IssuedSession, SessionRecord};
use crate::domain::repository::SessionStore;
use crate::domain::services::TokenGenerator;
use crate::domain::value_object::{session_token::SessionToken, user_name::UserName};
use crate::error::{AuthError, AuthResult, SessionRejection};
use crate::infra::token::RandomTokenGenerator;

/// Attempts at drawing an unused token before giving up
const MAX_TOKEN_ATTEMPTS: usize = 8;

/// In-memory session store
pub struct InMemorySessionStore<G = RandomTokenGenerator> {
    sessions: RwLock<HashMap<SessionToken, SessionRecord>>,
    generator: G,
    ttl: TimeDelta,
}

impl InMemorySessionStore<RandomTokenGenerator> {
    pub fn new(ttl: Duration) -> AuthResult<Self> {
        Self::with_generator(ttl, RandomTokenGenerator)
    }
}

impl<G: TokenGenerator> InMemorySessionStore<G> {
    pub fn with_generator(ttl: Duration, generator: G) -> AuthResult<Self> {
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;
        if ttl <= TimeDelta::zero() || Utc::now().checked_add_signed(ttl).is_none() {
            return Err(AuthError::Internal(format!(
                "Session TTL out of range: {}ms",
                ttl.num_milliseconds()
            )));
        }

        Ok(Self {
            sessions: RwLock::new(HashMap::new()),
            generator,
            ttl,
        })
    }

    /// Number of records held, live or not yet evicted
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Insert a new record for `subject` under an unused token
    ///
    /// A generated token that is already present is never overwritten.
    fn insert_fresh(
        &self,
        sessions: &mut HashMap<SessionToken, SessionRecord>,
        subject: UserName,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedSession> {
        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            match sessions.entry(self.generator.generate()) {
                Entry::Occupied(_) => {
                    tracing::warn!(attempt, "Session token collision, regenerating");
                }
                Entry::Vacant(slot) => {
                    let record = SessionRecord::new(slot.key().clone(), subject, now, self.ttl);
                    let issued = record.issued();
                    slot.insert(record);
                    return Ok(issued);
                }
            }
        }

        Err(AuthError::TokenSpaceExhausted)
    }
}

impl<G: TokenGenerator> SessionStore for InMemorySessionStore<G> {
    async fn create(&self, subject: &UserName) -> AuthResult<IssuedSession> {
        let mut sessions = self.sessions.write().await;
        self.insert_fresh(&mut sessions, subject.clone(), Utc::now())
    }

    async fn get(&self, token: &SessionToken) -> Option<SessionRecord> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                None => return None,
                Some(record) if record.is_live_at(Utc::now()) => return Some(record.clone()),
                Some(_) => {}
            }
        }

        // Expired under the read lock; another task may have acted since.
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        match sessions.get(token) {
            Some(record) if record.is_live_at(now) => Some(record.clone()),
            Some(_) => {
                sessions.remove(token);
                tracing::debug!(session = %token.fingerprint(), "Evicted expired session");
                None
            }
            None => None,
        }
    }

    async fn rotate(&self, token: &SessionToken) -> AuthResult<IssuedSession> {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();

        let (live, subject) = match sessions.get(token) {
            Some(record) => (record.is_live_at(now), record.subject.clone()),
            None => return Err(AuthError::Unauthenticated(SessionRejection::NotFound)),
        };
        if !live {
            sessions.remove(token);
            tracing::debug!(session = %token.fingerprint(), "Evicted expired session");
            return Err(AuthError::Unauthenticated(SessionRejection::Expired));
        }

        // Insert first: if no token can be allocated the old session survives.
        let issued = self.insert_fresh(&mut sessions, subject, now)?;
        sessions.remove(token);

        Ok(issued)
    }

    async fn revoke(&self, token: &SessionToken) {
        let removed = self.sessions.write().await.remove(token).is_some();
        tracing::debug!(session = %token.fingerprint(), removed, "Revoked session");
    }

    async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, record| record.is_live_at(now));
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Replays a fixed list of tokens, then falls back to random ones
    struct ScriptedGenerator {
        script: Mutex<VecDeque<&'static str>>,
    }

    impl ScriptedGenerator {
        fn new(script: &[&'static str]) -> Self {
            Self {
                script: Mutex::new(script.iter().copied().collect()),
            }
        }
    }

    impl TokenGenerator for ScriptedGenerator {
        fn generate(&self) -> SessionToken {
            match self.script.lock().unwrap().pop_front() {
                Some(token) => SessionToken::new(token),
                None => RandomTokenGenerator.generate(),
            }
        }
    }

    fn user(name: &str) -> UserName {
        UserName::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = InMemorySessionStore::new(Duration::from_secs(120)).unwrap();

        let issued = store.create(&user("user1")).await.unwrap();
        let record = store.get(&issued.token).await.unwrap();

        assert_eq!(record.subject, user("user1"));
        assert_eq!(record.expires_at, issued.expires_at);
        assert!(issued.expires_at > Utc::now() + TimeDelta::seconds(110));
    }

    #[tokio::test]
    async fn test_get_unknown_token() {
        let store = InMemorySessionStore::new(Duration::from_secs(120)).unwrap();
        assert!(store.get(&SessionToken::new("nope")).await.is_none());
    }

    #[tokio::test]
    async fn test_get_evicts_expired() {
        let store = InMemorySessionStore::new(Duration::from_millis(30)).unwrap();
        let issued = store.create(&user("user1")).await.unwrap();
        assert_eq!(store.len().await, 1);

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(store.get(&issued.token).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_rotate_replaces_token() {
        let store = InMemorySessionStore::new(Duration::from_secs(120)).unwrap();
        let first = store.create(&user("user2")).await.unwrap();

        let second = store.rotate(&first.token).await.unwrap();

        assert_ne!(first.token, second.token);
        assert!(store.get(&first.token).await.is_none());
        assert_eq!(store.get(&second.token).await.unwrap().subject, user("user2"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_rotate_unknown_token() {
        let store = InMemorySessionStore::new(Duration::from_secs(120)).unwrap();

        let err = store.rotate(&SessionToken::new("nope")).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Unauthenticated(SessionRejection::NotFound)
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_rotate_expired_token_evicts() {
        let store = InMemorySessionStore::new(Duration::from_millis(30)).unwrap();
        let issued = store.create(&user("user1")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;

        let err = store.rotate(&issued.token).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::Unauthenticated(SessionRejection::Expired)
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let store = InMemorySessionStore::new(Duration::from_secs(120)).unwrap();
        let issued = store.create(&user("user1")).await.unwrap();

        store.revoke(&issued.token).await;
        store.revoke(&issued.token).await;
        store.revoke(&SessionToken::new("never-issued")).await;

        assert!(store.get(&issued.token).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_records() {
        let short = InMemorySessionStore::new(Duration::from_millis(30)).unwrap();
        short.create(&user("user1")).await.unwrap();
        short.create(&user("user2")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(60)).await;
        let live = short.create(&user("user1")).await.unwrap();

        assert_eq!(short.purge_expired().await, 2);
        assert_eq!(short.len().await, 1);
        assert!(short.get(&live.token).await.is_some());
    }

    #[tokio::test]
    async fn test_collision_is_retried_not_overwritten() {
        let generator = ScriptedGenerator::new(&["a", "a", "a", "b"]);
        let store =
            InMemorySessionStore::with_generator(Duration::from_secs(120), generator).unwrap();

        let first = store.create(&user("user1")).await.unwrap();
        let second = store.create(&user("user2")).await.unwrap();

        assert_eq!(first.token.as_str(), "a");
        assert_eq!(second.token.as_str(), "b");
        assert_eq!(store.get(&first.token).await.unwrap().subject, user("user1"));
        assert_eq!(store.get(&second.token).await.unwrap().subject, user("user2"));
    }

    #[tokio::test]
    async fn test_exhausted_rotation_keeps_old_session() {
        let mut script = vec!["a"];
        script.extend(std::iter::repeat_n("a", MAX_TOKEN_ATTEMPTS));
        let generator = ScriptedGenerator::new(&script);
        let store =
            InMemorySessionStore::with_generator(Duration::from_secs(120), generator).unwrap();

        let issued = store.create(&user("user1")).await.unwrap();
        let err = store.rotate(&issued.token).await.unwrap_err();

        assert!(matches!(err, AuthError::TokenSpaceExhausted));
        assert_eq!(store.get(&issued.token).await.unwrap().subject, user("user1"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_rotation_has_single_winner() {
        let store = Arc::new(InMemorySessionStore::new(Duration::from_secs(120)).unwrap());
        let issued = store.create(&user("user1")).await.unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                let token = issued.token.clone();
                tokio::spawn(async move { store.rotate(&token).await })
            })
            .collect();

        let mut winners = Vec::new();
        for handle in handles {
            match handle.await.unwrap() {
                Ok(new) => winners.push(new),
                Err(err) => assert!(matches!(
                    err,
                    AuthError::Unauthenticated(SessionRejection::NotFound)
                )),
            }
        }

        assert_eq!(winners.len(), 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get(&winners[0].token).await.is_some());
    }

    #[test]
    fn test_rejects_zero_ttl() {
        assert!(InMemorySessionStore::new(Duration::ZERO).is_err());
    }
}
