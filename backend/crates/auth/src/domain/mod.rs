//! Domain Layer
//!
//! Contains entities, value objects, domain services and repository traits.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::session_record::{IssuedSession, SessionRecord};
pub use repository::{CredentialVerifier, SessionStore};
pub use services::TokenGenerator;
pub use value_object::{session_token::SessionToken, user_name::UserName};
