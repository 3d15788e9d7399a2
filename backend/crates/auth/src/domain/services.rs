//! Domain Services

use crate::domain::value_object::session_token::SessionToken;

/// Source of fresh session tokens
///
/// Implementations must be unpredictable (at least 128 bits of entropy).
/// Uniqueness is not required of the generator: the session store detects
/// collisions on insert and asks again.
pub trait TokenGenerator: Send + Sync + 'static {
    fn generate(&self) -> SessionToken;
}
