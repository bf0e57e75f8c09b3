//! Auth Routers

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{
    AuthSessionRepository, CredentialsRepository, PasswordResetRepository, UserRepository,
};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_admin};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create the Admin router with PostgreSQL repository
pub fn admin_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    admin_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository
        + CredentialsRepository
        + AuthSessionRepository
        + PasswordResetRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/session", get(handlers::session_status::<R>))
        .route("/reset/request", post(handlers::reset_request::<R>))
        .route("/reset/complete", post(handlers::reset_complete::<R>))
        .with_state(state)
}

/// Create a generic Admin router; every route sits behind the admin
/// gate
pub fn admin_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository
        + CredentialsRepository
        + AuthSessionRepository
        + PasswordResetRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let repo = Arc::new(repo);
    let config = Arc::new(config);

    let state = AuthAppState {
        repo: repo.clone(),
        config: config.clone(),
    };

    let gate = AuthMiddlewareState { repo, config };

    Router::new()
        .route("/users", get(handlers::list_users::<R>))
        .route("/users/{cpf}/promote", post(handlers::promote_user::<R>))
        .route("/users/{cpf}/access", post(handlers::set_user_access::<R>))
        .layer(middleware::from_fn(move |req, next| {
            let gate = gate.clone();
            async move { require_admin(gate, req, next).await }
        }))
        .with_state(state)
}
