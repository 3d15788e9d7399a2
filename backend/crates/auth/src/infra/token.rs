//! Random Token Generator

use crate::domain::services::TokenGenerator;
use crate::domain::value_object::session_token::SessionToken;

/// Token length in bytes (256 bits of entropy)
pub const SESSION_TOKEN_BYTES: usize = 32;

/// CSPRNG-backed generator producing base64url tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> SessionToken {
        let bytes = platform::crypto::random_bytes(SESSION_TOKEN_BYTES);
        SessionToken::new(platform::crypto::to_base64url(&bytes))
    }
}
