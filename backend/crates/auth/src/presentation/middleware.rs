//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::repository::{CredentialVerifier, SessionStore};
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthError;
use crate::presentation::handlers::{AuthAppState, extract_session_token};

/// Subject of the session that authenticated the request
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject(pub UserName);

/// Middleware that requires a valid session
///
/// Malformed cookies are rejected with 400, every other failure with 401.
/// On success the subject is stored in request extensions.
pub async fn require_session<S, V>(
    State(state): State<AuthAppState<S, V>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    S: SessionStore + Sync + 'static,
    V: CredentialVerifier + Sync + 'static,
{
    let token = extract_session_token(req.headers(), &state.config)?;
    let subject = state.lifecycle.welcome(token.as_ref()).await?;

    req.extensions_mut().insert(AuthenticatedSubject(subject));

    Ok(next.run(req).await)
}
