//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    auth_session::{AuthSession, SessionContext},
    password_reset::PasswordReset,
    user::{Credentials, NewUser, User},
};
pub use repository::{
    AuthSessionRepository, CredentialsRepository, PasswordResetRepository, UserRepository,
};
