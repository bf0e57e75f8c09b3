//! Auth Middleware
//!
//! Session and role gates for protected routes. On success the
//! resolved [`SessionContext`] is inserted into request extensions for
//! downstream handlers; the role always comes from the server-side
//! session row, never from anything the client sent.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::SessionContext;
use crate::domain::repository::AuthSessionRepository;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Middleware that requires a valid auth session
pub async fn require_session<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    // Take the token out of the headers before any await; the request
    // must not be borrowed across the session lookup
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let context = resolve_context(&state, token).await.ok_or_else(|| {
        (StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response()
    })?;

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

/// Middleware that requires a valid session with the admin role
pub async fn require_admin<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let context = resolve_context(&state, token).await.ok_or_else(|| {
        (StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response()
    })?;

    if !context.is_admin() {
        return Err(StatusCode::FORBIDDEN.into_response());
    }

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

async fn resolve_context<R>(
    state: &AuthMiddlewareState<R>,
    token: Option<String>,
) -> Option<SessionContext>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = token?;

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(&token).await.ok()
}
