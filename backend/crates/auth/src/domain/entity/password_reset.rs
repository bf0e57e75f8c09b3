//! Password Reset Entity
//!
//! A single-use, short-lived grant to replace the credential pair of
//! one CPF. Issuing one requires only knowledge of a registered CPF;
//! there is deliberately no out-of-band verification step.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::cpf::Cpf;

/// Password reset grant
#[derive(Debug, Clone)]
pub struct PasswordReset {
    /// Opaque single-use token handed to the requester
    pub token: Uuid,
    pub cpf: Cpf,
    /// Expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl PasswordReset {
    pub fn new(cpf: Cpf, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            token: Uuid::new_v4(),
            cpf,
            expires_at_ms: (now + ttl).timestamp_millis(),
            used: false,
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Usable exactly once, and only before expiry
    pub fn is_usable(&self) -> bool {
        !self.used && !self.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpf() -> Cpf {
        Cpf::new("12345678901").unwrap()
    }

    #[test]
    fn test_fresh_reset_is_usable() {
        let reset = PasswordReset::new(cpf(), Duration::minutes(15));
        assert!(reset.is_usable());
    }

    #[test]
    fn test_used_reset_is_not_usable() {
        let mut reset = PasswordReset::new(cpf(), Duration::minutes(15));
        reset.used = true;
        assert!(!reset.is_usable());
    }

    #[test]
    fn test_expired_reset_is_not_usable() {
        let reset = PasswordReset::new(cpf(), Duration::milliseconds(-1));
        assert!(reset.is_expired());
        assert!(!reset.is_usable());
    }
}
