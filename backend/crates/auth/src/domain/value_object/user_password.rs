//! User Password Value Objects
//!
//! Domain wrappers over `platform::password`. Two forms exist:
//! [`RawPassword`] for validated user input (zeroized on drop) and
//! [`StoredPassword`] for the persisted derived-key/salt pair.
//!
//! The pair is regenerated together on every password change; neither
//! half is ever rewritten alone.

use std::fmt;

use platform::password::{ClearTextPassword, DerivedKey, PasswordPolicyError};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped; `Debug` is redacted.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a raw password (length bounds, no control characters,
    /// NFKC normalized)
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        Ok(Self(ClearTextPassword::new(raw)?))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Stored Password (derived key + salt)
// ============================================================================

/// The persisted credential pair: PBKDF2 derived key and its salt
#[derive(Clone)]
pub struct StoredPassword {
    hash: DerivedKey,
    salt: Vec<u8>,
}

impl StoredPassword {
    /// Derive a fresh pair from a validated raw password
    pub fn from_raw(raw: &RawPassword) -> Self {
        let (hash, salt) = raw.inner().derive_with_new_salt();
        Self { hash, salt }
    }

    /// Reconstruct from database columns
    ///
    /// Returns `None` if the stored hash is not a valid derived-key
    /// length, which indicates a corrupted row.
    pub fn from_parts(hash: &[u8], salt: Vec<u8>) -> Option<Self> {
        Some(Self {
            hash: DerivedKey::from_bytes(hash)?,
            salt,
        })
    }

    /// Verify a raw password against this pair
    ///
    /// Re-derives with the stored salt and compares in constant time.
    pub fn verify(&self, raw: &RawPassword) -> bool {
        raw.inner().derive(&self.salt).ct_eq(self.hash.as_bytes())
    }

    /// Derived key bytes for storage
    pub fn hash_bytes(&self) -> &[u8] {
        self.hash.as_bytes()
    }

    /// Salt bytes for storage
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }
}

impl fmt::Debug for StoredPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredPassword")
            .field("hash", &"[KEY]")
            .field("salt", &"[SALT]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_policy() {
        assert!(RawPassword::new("secret1".to_string()).is_ok());
        assert!(RawPassword::new("12345".to_string()).is_err());
        assert!(RawPassword::new("".to_string()).is_err());
    }

    #[test]
    fn test_derive_and_verify() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let stored = StoredPassword::from_raw(&raw);

        assert!(stored.verify(&raw));

        let wrong = RawPassword::new("wrongpass".to_string()).unwrap();
        assert!(!stored.verify(&wrong));
    }

    #[test]
    fn test_fresh_pairs_use_distinct_salts() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let a = StoredPassword::from_raw(&raw);
        let b = StoredPassword::from_raw(&raw);

        assert_ne!(a.salt(), b.salt());
        assert_ne!(a.hash_bytes(), b.hash_bytes());
    }

    #[test]
    fn test_from_parts_roundtrip() {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        let stored = StoredPassword::from_raw(&raw);

        let restored =
            StoredPassword::from_parts(stored.hash_bytes(), stored.salt().to_vec()).unwrap();
        assert!(restored.verify(&raw));
    }

    #[test]
    fn test_from_parts_rejects_bad_hash_length() {
        assert!(StoredPassword::from_parts(&[1u8; 5], vec![0u8; 32]).is_none());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("supersecret".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("supersecret"));

        let stored = StoredPassword::from_raw(&raw);
        let debug = format!("{:?}", stored);
        assert!(debug.contains("[KEY]"));
        assert!(debug.contains("[SALT]"));
    }
}
