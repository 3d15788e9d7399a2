//! HTTP Handlers

use axum::Extension;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::{extract_cookie, set_cookie_header};

use crate::application::SessionLifecycle;
use crate::application::config::AuthConfig;
use crate::domain::entity::session_record::IssuedSession;
use crate::domain::repository::{CredentialVerifier, SessionStore};
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;
use crate::presentation::middleware::AuthenticatedSubject;

/// Shared state for auth handlers
pub struct AuthAppState<S, V>
where
    S: SessionStore + Sync + 'static,
    V: CredentialVerifier + Sync + 'static,
{
    pub lifecycle: SessionLifecycle<S, V>,
    pub config: Arc<AuthConfig>,
}

impl<S, V> Clone for AuthAppState<S, V>
where
    S: SessionStore + Sync + 'static,
    V: CredentialVerifier + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            lifecycle: self.lifecycle.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /signin
///
/// The body is decoded whatever its Content-Type.
pub async fn sign_in<S, V>(
    State(state): State<AuthAppState<S, V>>,
    body: Bytes,
) -> AuthResult<impl IntoResponse>
where
    S: SessionStore + Sync + 'static,
    V: CredentialVerifier + Sync + 'static,
{
    let issued = state.lifecycle.sign_in(&body).await?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&state.config, &issued))],
    ))
}

// ============================================================================
// Welcome
// ============================================================================

/// GET /welcome (behind `require_session`)
pub async fn welcome(Extension(subject): Extension<AuthenticatedSubject>) -> String {
    format!("Welcome {}!", subject.0)
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /refresh
pub async fn refresh<S, V>(
    State(state): State<AuthAppState<S, V>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    S: SessionStore + Sync + 'static,
    V: CredentialVerifier + Sync + 'static,
{
    let token = extract_session_token(&headers, &state.config)?;
    let issued = state.lifecycle.refresh(token.as_ref()).await?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&state.config, &issued))],
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /logout
///
/// Always 200 with a cleared cookie, whatever was presented.
pub async fn logout<S, V>(
    State(state): State<AuthAppState<S, V>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    S: SessionStore + Sync + 'static,
    V: CredentialVerifier + Sync + 'static,
{
    // A malformed cookie is treated like no cookie: there is nothing to revoke.
    let token = extract_session_token(&headers, &state.config).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Ignoring malformed cookie on logout");
        None
    });

    state.lifecycle.sign_out(token.as_ref()).await;

    let cookie = state.config.cookie().build_delete_cookie();

    (StatusCode::OK, [(header::SET_COOKIE, set_cookie_header(&cookie))])
}

// ============================================================================
// Helper Functions
// ============================================================================

pub(crate) fn extract_session_token(
    headers: &HeaderMap,
    config: &AuthConfig,
) -> AuthResult<Option<SessionToken>> {
    let token = extract_cookie(headers, &config.session_cookie_name)?;
    Ok(token.map(SessionToken::from))
}

fn session_cookie(config: &AuthConfig, issued: &IssuedSession) -> axum::http::HeaderValue {
    let cookie = config
        .cookie()
        .build_set_cookie(issued.token.as_str(), issued.expires_at);
    set_cookie_header(&cookie)
}
