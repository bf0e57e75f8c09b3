//! Reporting Routes
//!
//! The report dashboard is rendered by the frontend; this router only
//! exposes the session-gated data feed behind it. Access requires a
//! valid session, nothing more; the content itself is not role-gated.

use axum::{Extension, Json, Router, routing::get};
use serde::Serialize;
use std::sync::Arc;

use auth::middleware::{AuthMiddlewareState, require_session};
use auth::models::auth_session::SessionContext;
use auth::{AuthConfig, PgAuthRepository};

/// Identity payload for the dashboard header
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardResponse {
    cpf: String,
    role: String,
}

async fn dashboard(
    Extension(caller): Extension<SessionContext>,
) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        cpf: caller.cpf.as_str().to_string(),
        role: caller.role.code().to_string(),
    })
}

/// Create the reports router; every route sits behind the session gate
pub fn reports_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    let gate = AuthMiddlewareState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/dashboard", get(dashboard))
        .layer(axum::middleware::from_fn(move |req, next| {
            let gate = gate.clone();
            async move { require_session(gate, req, next).await }
        }))
}
