//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod lifecycle;
pub mod refresh;
pub mod sign_in;
pub mod sign_out;
pub mod welcome;

// Re-exports
pub use config::AuthConfig;
pub use lifecycle::SessionLifecycle;
pub use refresh::RefreshUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use welcome::WelcomeUseCase;
