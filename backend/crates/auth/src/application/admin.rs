//! Admin Use Cases
//!
//! Role promotion, access gating, and the user listing. Every one of
//! these re-checks the caller's role from the server-side session
//! context before touching state; the client never supplies a role.

use std::sync::Arc;

use crate::domain::entity::auth_session::SessionContext;
use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserRepository};
use crate::domain::value_object::{access_state::AccessState, cpf::Cpf, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

fn require_admin(caller: &SessionContext) -> AuthResult<()> {
    if !caller.is_admin() {
        return Err(AuthError::Unauthorized);
    }
    Ok(())
}

/// Promote use case
pub struct PromoteUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> PromoteUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Grant the admin role to a CPF. Returns whether a row actually
    /// changed: `false` both for an unknown CPF and for an account
    /// that is already an admin.
    pub async fn execute(&self, caller: &SessionContext, cpf: &str) -> AuthResult<bool> {
        require_admin(caller)?;

        let cpf = Cpf::new(cpf).map_err(|_| AuthError::InvalidCpf)?;

        let changed = self.user_repo.update_role(&cpf, UserRole::Admin).await?;

        if changed {
            tracing::info!(
                cpf = %cpf,
                by = %caller.cpf,
                "User promoted to admin"
            );
        }

        Ok(changed)
    }
}

/// Set access use case
pub struct SetAccessUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SetAccessUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Flip the access gate for a CPF. Returns whether a row actually
    /// changed: `false` both for an unknown CPF and for a no-op flip.
    pub async fn execute(
        &self,
        caller: &SessionContext,
        cpf: &str,
        granted: bool,
    ) -> AuthResult<bool> {
        require_admin(caller)?;

        let cpf = Cpf::new(cpf).map_err(|_| AuthError::InvalidCpf)?;

        let access = AccessState::from_granted(granted);
        let changed = self.user_repo.update_access(&cpf, access).await?;

        if changed {
            tracing::info!(
                cpf = %cpf,
                access = %access,
                by = %caller.cpf,
                "User access changed"
            );
        }

        Ok(changed)
    }
}

/// List users use case
pub struct ListUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ListUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(
        &self,
        caller: &SessionContext,
        filter: &UserFilter,
    ) -> AuthResult<Vec<User>> {
        require_admin(caller)?;
        self.user_repo.list_filtered(filter).await
    }
}
