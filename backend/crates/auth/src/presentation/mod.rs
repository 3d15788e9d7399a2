//! Presentation Layer
//!
//! HTTP handlers, router, and middleware.

pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AuthenticatedSubject, require_session};
pub use router::session_router;
