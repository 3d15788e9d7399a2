//! Cookie Management Infrastructure
//!
//! Common cookie handling utilities and configuration.

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Errors raised while reading the `Cookie` request header
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CookieError {
    /// Header bytes are not visible ASCII
    #[error("Cookie header is not valid ASCII")]
    InvalidHeader,

    /// Named cookie carries characters outside the cookie-octet set
    #[error("Cookie {0} has an invalid value")]
    InvalidValue(String),
}

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value that expires at `expires_at`
    pub fn build_set_cookie(&self, value: &str, expires_at: DateTime<Utc>) -> String {
        let max_age = (expires_at - Utc::now()).num_seconds().max(0);

        let mut cookie = format!("{}={}", self.name, value);
        cookie.push_str(&format!("; Expires={}", http_date(expires_at)));
        cookie.push_str(&format!("; Max-Age={}", max_age));
        self.push_attributes(&mut cookie);
        cookie
    }

    /// Build Set-Cookie header for deletion (already expired)
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; Expires={}; Max-Age=0",
            self.name,
            http_date(Utc::now())
        );
        self.push_attributes(&mut cookie);
        cookie
    }

    fn push_attributes(&self, cookie: &mut String) {
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
    }
}

/// Format a timestamp as an RFC 7231 IMF-fixdate
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Extract a cookie value from headers
///
/// Returns `Ok(None)` when no `Cookie` header carries `name`. Every `Cookie`
/// header is scanned and the first pair with a matching name wins. Values
/// wrapped in double quotes are unquoted.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Result<Option<String>, CookieError> {
    for raw in headers.get_all(header::COOKIE) {
        let raw = raw.to_str().map_err(|_| CookieError::InvalidHeader)?;

        for pair in raw.split(';') {
            let Some((key, value)) = pair.trim().split_once('=') else {
                continue;
            };
            if key.trim() != name {
                continue;
            }

            let value = unquote(value.trim());
            if !value.bytes().all(is_cookie_octet) {
                return Err(CookieError::InvalidValue(name.to_string()));
            }
            return Ok(Some(value.to_string()));
        }
    }

    Ok(None)
}

/// Create a Set-Cookie header value
///
/// A value that is not a valid header degrades to an empty header.
pub fn set_cookie_header(cookie: &str) -> HeaderValue {
    HeaderValue::from_str(cookie).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Set-Cookie value is not a valid header, sending it empty");
        HeaderValue::from_static("")
    })
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// RFC 6265 cookie-octet
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}
