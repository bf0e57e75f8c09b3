//! Check Session Use Case
//!
//! Verifies a session token and resolves the identity behind it.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::verify_session_token;
use crate::domain::entity::auth_session::{AuthSession, SessionContext};
use crate::domain::repository::AuthSessionRepository;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Resolve the caller's identity from a token
    pub async fn execute(&self, session_token: &str) -> AuthResult<SessionContext> {
        let session = self.get_session(session_token).await?;
        Ok(SessionContext::from(&session))
    }

    /// Verify the token, load the session, and refresh its activity
    pub async fn get_session(&self, session_token: &str) -> AuthResult<AuthSession> {
        let session_id = verify_session_token(session_token, &self.config.session_secret)?;

        let session = self
            .session_repo
            .find_session(session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete_session(session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        let mut session = session;
        session.touch();

        // Persist the activity bump in the background
        let session_clone = session.clone();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update_session(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(session)
    }
}
