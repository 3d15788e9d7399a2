//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::SessionLifecycle;
use crate::application::config::AuthConfig;
use crate::domain::repository::{CredentialVerifier, SessionStore};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_session;

/// Create the session router for any store / verifier implementation
///
/// The store is taken as an `Arc` so the caller can keep a handle for
/// maintenance (e.g. the expired-session sweeper).
pub fn session_router<S, V>(session_store: Arc<S>, verifier: Arc<V>, config: AuthConfig) -> Router
where
    S: SessionStore + Sync + 'static,
    V: CredentialVerifier + Sync + 'static,
{
    let state = AuthAppState {
        lifecycle: SessionLifecycle::new(session_store, verifier),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/welcome", get(handlers::welcome))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<S, V>,
        ));

    Router::new()
        .route("/signin", post(handlers::sign_in::<S, V>))
        .route("/refresh", post(handlers::refresh::<S, V>))
        .route("/logout", post(handlers::logout::<S, V>))
        .merge(protected)
        .with_state(state)
}
