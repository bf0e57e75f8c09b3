//! User Entity
//!
//! Profile view of a registered person. The credential pair lives in
//! [`Credentials`] so that handlers and DTOs never see hash or salt.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    access_state::AccessState, cpf::Cpf, user_password::StoredPassword, user_role::UserRole,
};

/// User entity (no secret material)
#[derive(Debug, Clone)]
pub struct User {
    /// Surrogate key assigned by the store, never reused
    pub id: i64,
    /// Natural key for all lookups, immutable after creation
    pub cpf: Cpf,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub role: UserRole,
    pub access: AccessState,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if the access gate allows authentication
    pub fn can_login(&self) -> bool {
        self.access.can_login()
    }
}

/// A user pending insertion; the store assigns `id` and `created_at`
pub struct NewUser {
    pub cpf: Cpf,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub role: UserRole,
    pub access: AccessState,
    pub password: StoredPassword,
}

impl NewUser {
    /// Create with the registration defaults: regular role, blocked
    /// access until an administrator grants it
    pub fn new(
        cpf: Cpf,
        first_name: String,
        last_name: String,
        city: String,
        password: StoredPassword,
    ) -> Self {
        Self {
            cpf,
            first_name,
            last_name,
            city,
            role: UserRole::default(),
            access: AccessState::default(),
            password,
        }
    }

    /// Override the role; callers must have verified admin privileges
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

/// Credential view of a user row
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: i64,
    pub cpf: Cpf,
    pub password: StoredPassword,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn stored(pw: &str) -> StoredPassword {
        StoredPassword::from_raw(&RawPassword::new(pw.to_string()).unwrap())
    }

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser::new(
            Cpf::new("12345678901").unwrap(),
            "Ana".into(),
            "Silva".into(),
            "Recife".into(),
            stored("secret1"),
        );

        assert_eq!(user.role, UserRole::Regular);
        assert_eq!(user.access, AccessState::Blocked);
    }

    #[test]
    fn test_with_role() {
        let user = NewUser::new(
            Cpf::new("12345678901").unwrap(),
            "Ana".into(),
            "Silva".into(),
            "Recife".into(),
            stored("secret1"),
        )
        .with_role(UserRole::Admin);

        assert_eq!(user.role, UserRole::Admin);
    }
}
