//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Cryptographic utilities (CSPRNG, constant-time comparison, Base64)
//! - Password key derivation (PBKDF2-HMAC-SHA256)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
