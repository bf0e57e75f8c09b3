//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the
//! infrastructure layer.

use crate::domain::entity::{
    auth_session::AuthSession,
    password_reset::PasswordReset,
    user::{Credentials, NewUser, User},
};
use crate::domain::value_object::{
    access_state::AccessState, cpf::Cpf, user_password::StoredPassword, user_role::UserRole,
};
use crate::error::AuthResult;
use uuid::Uuid;

/// Access-gate dimension of the admin user listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessFilter {
    #[default]
    All,
    Granted,
    Blocked,
}

/// Role dimension of the admin user listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Admins,
    Regular,
}

/// Filter for the admin user listing
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring match on first name, last name, CPF
    pub search: Option<String>,
    pub access: AccessFilter,
    pub role: RoleFilter,
}

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; fails with `CpfTaken` when the CPF is
    /// already registered (backed by the unique constraint, so two
    /// concurrent registrations cannot both succeed)
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by CPF
    async fn find_by_cpf(&self, cpf: &Cpf) -> AuthResult<Option<User>>;

    /// Set the role; returns whether a row was changed
    async fn update_role(&self, cpf: &Cpf, role: UserRole) -> AuthResult<bool>;

    /// Set the access gate; returns whether a row was changed
    async fn update_access(&self, cpf: &Cpf, access: AccessState) -> AuthResult<bool>;

    /// List users matching the filter, most recently created first
    async fn list_filtered(&self, filter: &UserFilter) -> AuthResult<Vec<User>>;
}

/// Credentials repository trait
#[trait_variant::make(CredentialsRepository: Send)]
pub trait LocalCredentialsRepository {
    /// Find the credential pair by CPF
    async fn find_credentials(&self, cpf: &Cpf) -> AuthResult<Option<Credentials>>;

    /// Replace hash and salt together; returns whether a row was
    /// changed
    async fn update_credentials(&self, cpf: &Cpf, password: &StoredPassword) -> AuthResult<bool>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create a new session
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID
    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>>;

    /// Update session (e.g. last activity)
    async fn update_session(&self, session: &AuthSession) -> AuthResult<()>;

    /// Delete a session
    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired_sessions(&self) -> AuthResult<u64>;
}

/// Password reset repository trait
#[trait_variant::make(PasswordResetRepository: Send)]
pub trait LocalPasswordResetRepository {
    /// Store a new reset grant
    async fn create_reset(&self, reset: &PasswordReset) -> AuthResult<()>;

    /// Find a reset grant by token
    async fn find_reset(&self, token: Uuid) -> AuthResult<Option<PasswordReset>>;

    /// Mark a grant consumed; returns whether a row was changed
    async fn mark_reset_used(&self, token: Uuid) -> AuthResult<bool>;

    /// Clean up expired grants
    async fn cleanup_expired_resets(&self) -> AuthResult<u64>;
}
