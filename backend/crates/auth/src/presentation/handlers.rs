//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::CookieConfig;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, CompleteResetInput, CompleteResetUseCase, ListUsersUseCase, LoginInput,
    LoginUseCase, LogoutUseCase, PromoteUseCase, RegisterInput, RegisterUseCase,
    RequestResetUseCase, SetAccessUseCase,
};
use crate::domain::entity::auth_session::SessionContext;
use crate::domain::repository::{
    AuthSessionRepository, CredentialsRepository, PasswordResetRepository, UserRepository,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangedResponse, ListUsersQuery, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, ResetCompleteRequest, ResetRequestRequest, ResetRequestResponse,
    SessionStatusResponse, SetAccessRequest, UserSummary,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
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
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
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
    // Registration is open, but the admin flag needs a caller with an
    // admin session; resolve one if a cookie happens to be present
    let caller = resolve_session(&state, &headers).await;

    let use_case = RegisterUseCase::new(state.repo.clone());

    let input = RegisterInput {
        cpf: req.cpf,
        first_name: req.first_name,
        last_name: req.last_name,
        city: req.city,
        password: req.password,
        confirm_password: req.confirm_password,
        admin: req.admin,
    };

    let user = use_case.execute(input, caller.as_ref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user.id,
            cpf: user.cpf.as_str().to_string(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
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
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        cpf: req.cpf,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    let cookie = session_cookie(&state.config).build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            cpf: output.identity.cpf.as_str().to_string(),
            first_name: output.identity.first_name,
            last_name: output.identity.last_name,
            city: output.identity.city,
            role: output.identity.role.code().to_string(),
            expires_at_ms: output.expires_at_ms,
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
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
    if let Some(token) = extract_session_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());
        // Errors do not matter; the cookie gets cleared either way
        let _ = use_case.execute(&token).await;
    }

    let cookie = session_cookie(&state.config).build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionStatusResponse>>
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
    let token = extract_session_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    // An auth rejection means anonymous; a store failure is still a
    // failure and must not masquerade as "not logged in"
    let session = match token {
        Some(token) => match use_case.get_session(&token).await {
            Ok(session) => Some(session),
            Err(err @ AuthError::Database(_)) => return Err(err),
            Err(_) => None,
        },
        None => None,
    };

    match session {
        Some(session) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            cpf: Some(session.cpf.as_str().to_string()),
            role: Some(session.role.code().to_string()),
            expires_at_ms: Some(session.expires_at_ms),
        })),
        None => Ok(Json(SessionStatusResponse {
            authenticated: false,
            cpf: None,
            role: None,
            expires_at_ms: None,
        })),
    }
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/auth/reset/request
pub async fn reset_request<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ResetRequestRequest>,
) -> AuthResult<Json<ResetRequestResponse>>
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
    let use_case =
        RequestResetUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let grant = use_case.execute(&req.cpf).await?;

    Ok(Json(ResetRequestResponse {
        reset_token: grant.token,
        expires_at_ms: grant.expires_at_ms,
    }))
}

/// POST /api/auth/reset/complete
pub async fn reset_complete<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<ResetCompleteRequest>,
) -> AuthResult<StatusCode>
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
    let use_case = CompleteResetUseCase::new(state.repo.clone(), state.repo.clone());

    let input = CompleteResetInput {
        token: req.token,
        new_password: req.new_password,
        confirm_password: req.confirm_password,
    };

    use_case.execute(input).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Admin (the session context is inserted by require_admin middleware)
// ============================================================================

/// GET /api/admin/users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    Extension(caller): Extension<SessionContext>,
    Query(query): Query<ListUsersQuery>,
) -> AuthResult<Json<Vec<UserSummary>>>
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
    let use_case = ListUsersUseCase::new(state.repo.clone());

    let users = use_case.execute(&caller, &query.into_filter()).await?;

    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// POST /api/admin/users/{cpf}/promote
pub async fn promote_user<R>(
    State(state): State<AuthAppState<R>>,
    Extension(caller): Extension<SessionContext>,
    Path(cpf): Path<String>,
) -> AuthResult<Json<ChangedResponse>>
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
    let use_case = PromoteUseCase::new(state.repo.clone());

    let changed = use_case.execute(&caller, &cpf).await?;

    Ok(Json(ChangedResponse { changed }))
}

/// POST /api/admin/users/{cpf}/access
pub async fn set_user_access<R>(
    State(state): State<AuthAppState<R>>,
    Extension(caller): Extension<SessionContext>,
    Path(cpf): Path<String>,
    Json(req): Json<SetAccessRequest>,
) -> AuthResult<Json<ChangedResponse>>
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
    let use_case = SetAccessUseCase::new(state.repo.clone());

    let changed = use_case.execute(&caller, &cpf, req.granted).await?;

    Ok(Json(ChangedResponse { changed }))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn extract_session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    platform::cookie::extract_cookie(headers, name)
}

fn session_cookie(config: &AuthConfig) -> CookieConfig {
    CookieConfig {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.session_ttl_secs()),
    }
}

async fn resolve_session<R>(
    state: &AuthAppState<R>,
    headers: &HeaderMap,
) -> Option<SessionContext>
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
    let token = extract_session_cookie(headers, &state.config.session_cookie_name)?;

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(&token).await.ok()
}
