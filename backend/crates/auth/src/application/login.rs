//! Login Use Case
//!
//! Authenticates a user by CPF and password and creates a session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::sign_session_token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthSessionRepository, CredentialsRepository, UserRepository};
use crate::domain::value_object::{cpf::Cpf, user_password::RawPassword, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub cpf: String,
    pub password: String,
}

/// Identity returned to the caller after a successful login
pub struct Identity {
    pub cpf: Cpf,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub role: UserRole,
}

/// Login output
pub struct LoginOutput {
    /// Signed token for the session cookie
    pub session_token: String,
    pub identity: Identity,
    pub expires_at_ms: i64,
}

/// Login use case
pub struct LoginUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialsRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    credentials_repo: Arc<C>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, C, S> LoginUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialsRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        credentials_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            credentials_repo,
            session_repo,
            config,
        }
    }

    /// Check order: CPF format, account existence, access gate, then
    /// the password. A blocked account is reported as blocked even on
    /// a wrong password, so the gate is the first thing a returning
    /// user learns about.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let cpf = Cpf::new(&input.cpf).map_err(|_| AuthError::InvalidCpf)?;

        let user = self
            .user_repo
            .find_by_cpf(&cpf)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.can_login() {
            return Err(AuthError::AccessBlocked);
        }

        let credentials = self
            .credentials_repo
            .find_credentials(&cpf)
            .await?
            .ok_or_else(|| AuthError::Internal("Credentials not found".to_string()))?;

        // A password the policy would never have accepted cannot match
        let raw = RawPassword::new(input.password).map_err(|_| AuthError::BadCredentials)?;

        if !credentials.password.verify(&raw) {
            return Err(AuthError::BadCredentials);
        }

        let session = AuthSession::new(
            user.id,
            user.cpf.clone(),
            user.role,
            self.config.session_ttl_chrono(),
        );
        self.session_repo.create_session(&session).await?;

        let session_token = sign_session_token(session.session_id, &self.config.session_secret);

        tracing::info!(
            cpf = %user.cpf,
            session_id = %session.session_id,
            "User logged in"
        );

        Ok(LoginOutput {
            session_token,
            identity: Identity {
                cpf: user.cpf,
                first_name: user.first_name,
                last_name: user.last_name,
                city: user.city,
                role: user.role,
            },
            expires_at_ms: session.expires_at_ms,
        })
    }
}
