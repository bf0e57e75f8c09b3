//! Register Use Case
//!
//! Creates a new user account keyed by CPF.

use std::sync::Arc;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::entity::auth_session::SessionContext;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    cpf::Cpf, user_password::{RawPassword, StoredPassword}, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Registration input
pub struct RegisterInput {
    pub cpf: String,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub password: String,
    pub confirm_password: String,
    /// Request the admin role; ignored unless the caller is an admin
    pub admin: bool,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Validate the input, hash the password, and insert the account.
    ///
    /// New accounts start with the regular role and blocked access; an
    /// administrator must grant access before the first login. The
    /// `admin` flag in the input only takes effect when the caller
    /// holds an admin session, so an anonymous request can never mint
    /// an administrator.
    pub async fn execute(
        &self,
        input: RegisterInput,
        caller: Option<&SessionContext>,
    ) -> AuthResult<User> {
        let cpf = Cpf::new(&input.cpf).map_err(|_| AuthError::InvalidCpf)?;

        let first_name = required(&input.first_name, "firstName")?;
        let last_name = required(&input.last_name, "lastName")?;
        let city = required(&input.city, "city")?;

        if input.password != input.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let raw = RawPassword::new(input.password)
            .map_err(|e| AuthError::WeakPassword(e.to_string()))?;
        let password = StoredPassword::from_raw(&raw);

        let mut new_user = NewUser::new(cpf, first_name, last_name, city, password);
        if input.admin && caller.is_some_and(|c| c.is_admin()) {
            new_user = new_user.with_role(UserRole::Admin);
        }

        // The unique constraint on cpf decides duplicate races; the
        // repository maps the violation to CpfTaken
        let user = self.user_repo.create(&new_user).await?;

        tracing::info!(
            cpf = %user.cpf,
            role = %user.role,
            "User registered"
        );

        Ok(user)
    }
}

fn required(value: &str, field: &'static str) -> AuthResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(trimmed.to_string())
}
