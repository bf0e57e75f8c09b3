//! Password Key Derivation
//!
//! PBKDF2-HMAC-SHA256 password handling with:
//! - Per-credential random salts (32 bytes)
//! - Slow derivation (100k rounds) against brute force
//! - Zeroization of clear-text material
//! - Constant-time comparison of derived keys
//!
//! The derived key and the salt are always produced and stored as a
//! pair; replacing a password replaces both.

use std::fmt;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto;

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length in characters
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Salt length in bytes
pub const SALT_LENGTH: usize = 32;

/// Derived key length in bytes (SHA-256 output size)
pub const DERIVED_KEY_LENGTH: usize = 32;

/// PBKDF2 iteration count
pub const PBKDF2_ROUNDS: u32 = 100_000;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains control characters
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`; `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// Unicode is normalized with NFKC before validation so the same
    /// password always derives the same key regardless of input form.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Count Unicode code points, not bytes
        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' {
                return Err(PasswordPolicyError::InvalidCharacter);
            }
        }

        Ok(Self(normalized))
    }

    /// Get the password bytes for derivation
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Derive a key from this password and the given salt
    ///
    /// Deterministic for equal `(password, salt)` inputs; never fails.
    pub fn derive(&self, salt: &[u8]) -> DerivedKey {
        let mut key = [0u8; DERIVED_KEY_LENGTH];
        pbkdf2_hmac::<Sha256>(self.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);
        DerivedKey(key)
    }

    /// Derive a key with a freshly generated random salt
    pub fn derive_with_new_salt(&self) -> (DerivedKey, Vec<u8>) {
        let salt = generate_salt();
        (self.derive(&salt), salt)
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Derived Key (Safe to store)
// ============================================================================

/// PBKDF2 derived key, the only password form that may be persisted
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey([u8; DERIVED_KEY_LENGTH]);

impl DerivedKey {
    /// Reconstruct from stored bytes (e.g. a BYTEA column)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let array: [u8; DERIVED_KEY_LENGTH] = bytes.try_into().ok()?;
        Some(Self(array))
    }

    /// Key bytes for storage
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Constant-time comparison against another key's bytes
    pub fn ct_eq(&self, other: &[u8]) -> bool {
        crypto::constant_time_eq(&self.0, other)
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DerivedKey").field(&"[KEY]").finish()
    }
}

/// Generate a fresh random salt
pub fn generate_salt() -> Vec<u8> {
    crypto::random_bytes(SALT_LENGTH)
}

// ============================================================================
// Tests
// ============================================================================
