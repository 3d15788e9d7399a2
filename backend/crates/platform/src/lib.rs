//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (CSPRNG bytes, SHA-256, Base64, constant-time compare)
//! - Cookie parsing and Set-Cookie construction

pub mod cookie;
pub mod crypto;
