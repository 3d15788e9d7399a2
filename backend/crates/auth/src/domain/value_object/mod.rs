//! Value Object Module

pub mod session_token;
pub mod user_name;
