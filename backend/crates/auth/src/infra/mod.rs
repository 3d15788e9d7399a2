//! Infrastructure Layer
//!
//! In-process implementations of the domain traits.

pub mod memory;
pub mod static_credentials;
pub mod token;

pub use memory::InMemorySessionStore;
pub use static_credentials::StaticCredentialVerifier;
pub use token::RandomTokenGenerator;
