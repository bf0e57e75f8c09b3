//! Password Reset Use Cases
//!
//! Two-step flow: request a single-use token for a CPF, then redeem
//! it with the new password. The token is the only proof required, so
//! anyone who knows a registered CPF can rotate its password; the API
//! is intended to sit behind an operator-facing frontend.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::password_reset::PasswordReset;
use crate::domain::repository::{CredentialsRepository, PasswordResetRepository, UserRepository};
use crate::domain::value_object::{
    cpf::Cpf,
    user_password::{RawPassword, StoredPassword},
};
use crate::error::{AuthError, AuthResult};

/// Reset grant handed back to the requester
pub struct ResetGrant {
    pub token: Uuid,
    pub expires_at_ms: i64,
}

/// Request reset use case
pub struct RequestResetUseCase<U, P>
where
    U: UserRepository,
    P: PasswordResetRepository,
{
    user_repo: Arc<U>,
    reset_repo: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<U, P> RequestResetUseCase<U, P>
where
    U: UserRepository,
    P: PasswordResetRepository,
{
    pub fn new(user_repo: Arc<U>, reset_repo: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            reset_repo,
            config,
        }
    }

    pub async fn execute(&self, cpf: &str) -> AuthResult<ResetGrant> {
        let cpf = Cpf::new(cpf).map_err(|_| AuthError::InvalidCpf)?;

        self.user_repo
            .find_by_cpf(&cpf)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let reset = PasswordReset::new(cpf, self.config.reset_ttl_chrono());
        self.reset_repo.create_reset(&reset).await?;

        // The token is the whole proof of the grant; it never goes to
        // the logs
        tracing::info!(cpf = %reset.cpf, "Password reset requested");

        Ok(ResetGrant {
            token: reset.token,
            expires_at_ms: reset.expires_at_ms,
        })
    }
}

/// Complete reset input
pub struct CompleteResetInput {
    pub token: Uuid,
    pub new_password: String,
    pub confirm_password: String,
}

/// Complete reset use case
pub struct CompleteResetUseCase<C, P>
where
    C: CredentialsRepository,
    P: PasswordResetRepository,
{
    credentials_repo: Arc<C>,
    reset_repo: Arc<P>,
}

impl<C, P> CompleteResetUseCase<C, P>
where
    C: CredentialsRepository,
    P: PasswordResetRepository,
{
    pub fn new(credentials_repo: Arc<C>, reset_repo: Arc<P>) -> Self {
        Self {
            credentials_repo,
            reset_repo,
        }
    }

    /// Redeem a grant: claim the token, then hash the new password
    /// with a fresh salt and replace the credential pair atomically
    pub async fn execute(&self, input: CompleteResetInput) -> AuthResult<()> {
        let reset = self
            .reset_repo
            .find_reset(input.token)
            .await?
            .ok_or(AuthError::ResetInvalid)?;

        if !reset.is_usable() {
            return Err(AuthError::ResetInvalid);
        }

        if input.new_password != input.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let raw = RawPassword::new(input.new_password)
            .map_err(|e| AuthError::WeakPassword(e.to_string()))?;
        let password = StoredPassword::from_raw(&raw);

        // Claim the token before writing credentials; the store flips
        // `used` guardedly, so of two racing redeems only one gets
        // `true` here and the loser never reaches the password
        if !self.reset_repo.mark_reset_used(input.token).await? {
            return Err(AuthError::ResetInvalid);
        }

        let changed = self
            .credentials_repo
            .update_credentials(&reset.cpf, &password)
            .await?;
        if !changed {
            // Account deleted between request and redeem
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(cpf = %reset.cpf, "Password reset completed");

        Ok(())
    }
}
