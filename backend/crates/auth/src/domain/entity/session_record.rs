//! Session Record Entity
//!
//! Server-side state behind a session token. Records are immutable once
//! stored: rotation replaces the record under a new token instead of
//! editing the old one.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{session_token::SessionToken, user_name::UserName};

/// Session record entity
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// Primary key, also the cookie value
    pub token: SessionToken,
    /// Subject the session authenticates
    pub subject: UserName,
    /// Absolute expiry; the record is live strictly before this instant
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a record expiring `ttl` after `now`
    ///
    /// TTL is provided by the store (config), not hard-coded here.
    pub fn new(token: SessionToken, subject: UserName, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token,
            subject,
            expires_at: now + ttl,
        }
    }

    #[inline]
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_milliseconds().max(0)
    }

    /// What the client receives for this record
    pub fn issued(&self) -> IssuedSession {
        IssuedSession {
            token: self.token.clone(),
            expires_at: self.expires_at,
        }
    }
}

/// Token and expiry handed back by signin and refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub token: SessionToken,
    pub expires_at: DateTime<Utc>,
}
