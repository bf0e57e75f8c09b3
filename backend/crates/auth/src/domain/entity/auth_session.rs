//! Auth Session Entity
//!
//! Server-side session created at login. The client only ever holds
//! the signed token that references a row here; identity and role are
//! never trusted from client input.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::value_object::{cpf::Cpf, user_role::UserRole};

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    pub user_id: i64,
    pub cpf: Cpf,
    /// Role snapshot at login time
    pub role: UserRole,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create a new session; TTL comes from the application config
    pub fn new(user_id: i64, cpf: Cpf, role: UserRole, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            cpf,
            role,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}

/// Resolved identity attached to authenticated requests
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: i64,
    pub cpf: Cpf,
    pub role: UserRole,
}

impl SessionContext {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&AuthSession> for SessionContext {
    fn from(session: &AuthSession) -> Self {
        Self {
            user_id: session.user_id,
            cpf: session.cpf.clone(),
            role: session.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpf() -> Cpf {
        Cpf::new("12345678901").unwrap()
    }

    #[test]
    fn test_new_session_not_expired() {
        let session = AuthSession::new(1, cpf(), UserRole::Regular, Duration::hours(12));
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 0);
    }

    #[test]
    fn test_expired_session() {
        let session = AuthSession::new(1, cpf(), UserRole::Regular, Duration::milliseconds(-1));
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }

    #[test]
    fn test_context_from_session() {
        let session = AuthSession::new(7, cpf(), UserRole::Admin, Duration::hours(1));
        let ctx = SessionContext::from(&session);
        assert_eq!(ctx.user_id, 7);
        assert!(ctx.is_admin());
    }
}
