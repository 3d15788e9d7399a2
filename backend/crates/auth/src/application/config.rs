//! Application Configuration
//!
//! Configuration for the session application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Session application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session TTL, applied at signin and again at every refresh
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// Whether the cookie is hidden from scripts
    pub cookie_http_only: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Cookie path
    pub cookie_path: String,
    /// Period of the expired-session sweeper; `None` keeps eviction lazy
    pub sweep_interval: Option<Duration>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session_token".to_string(),
            session_ttl: Duration::from_secs(120),
            cookie_secure: true,
            cookie_http_only: true,
            cookie_same_site: SameSite::Lax,
            cookie_path: "/".to_string(),
            sweep_interval: None,
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie, plain HTTP)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Get session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    /// Cookie attributes for the session cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: self.cookie_http_only,
            same_site: self.cookie_same_site,
            path: self.cookie_path.clone(),
        }
    }
}
