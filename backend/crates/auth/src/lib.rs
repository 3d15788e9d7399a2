//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session record, value objects, store / verifier traits
//! - `application/` - Use cases and the session lifecycle service
//! - `infra/` - In-memory store, static identity table, token generator
//! - `presentation/` - HTTP handlers, router, middleware
//!
//! ## Features
//! - Sign in with username + password, session handed out as a cookie
//! - Opaque random session tokens with a fixed TTL
//! - Atomic token rotation on refresh
//! - Idempotent sign out
//!
//! ## Security Model
//! - Tokens carry 256 bits of CSPRNG entropy and no structure
//! - Expired sessions are never honoured, evicted when first observed
//! - A rotated token is dead as soon as the rotation completes
//! - Error responses carry no body and never say why a session was rejected

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::lifecycle::SessionLifecycle;
pub use error::{AuthError, AuthResult, SessionRejection};
pub use infra::{InMemorySessionStore, RandomTokenGenerator, StaticCredentialVerifier};
pub use presentation::router::session_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod store {
    pub use crate::domain::repository::{CredentialVerifier, SessionStore};
    pub use crate::infra::memory::InMemorySessionStore;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
