//! Logout Use Case
//!
//! Deletes the server-side session for a token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::verify_session_token;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> LogoutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Logout is idempotent: an invalid or already-deleted token still
    /// ends with the cookie cleared, so nothing here is an error
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        let Ok(session_id) = verify_session_token(session_token, &self.config.session_secret)
        else {
            return Ok(());
        };

        self.session_repo.delete_session(session_id).await?;

        tracing::info!(session_id = %session_id, "User logged out");

        Ok(())
    }
}
