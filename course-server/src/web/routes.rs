//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::Value;
use tower_http::services::ServeDir;
use tracing::error;

use crate::gi::{Coordinate, GiError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` is the path to the map client's static assets, served as the
/// fallback for anything the API routes don't claim.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/courses/search", get(search_courses))
        .route("/api/courses/gps", get(course_gps))
        .route("/api/auth/check", get(auth_check))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search courses by free text and optional coordinate.
async fn search_courses(
    State(state): State<AppState>,
    Query(req): Query<CourseSearchRequest>,
) -> Result<Json<Vec<Value>>, AppError> {
    let coordinate = match (req.lat, req.lng) {
        (Some(latitude), Some(longitude)) => Some(Coordinate {
            latitude,
            longitude,
        }),
        _ => None,
    };

    let results = state.search.search(&req.q, coordinate).await?;
    Ok(Json(results.as_ref().clone()))
}

/// GPS detail for a course, passed through from upstream.
async fn course_gps(
    State(state): State<AppState>,
    Query(req): Query<GpsRequest>,
) -> Result<Json<Value>, AppError> {
    let detail = state.gps.get(&req.public_id).await?;
    Ok(Json(detail.as_ref().clone()))
}

/// Verify that upstream authentication works, without leaking the token.
async fn auth_check(State(state): State<AppState>) -> Json<AuthCheckResponse> {
    match state.tokens.acquire().await {
        Ok(token) => Json(AuthCheckResponse {
            ok: true,
            token: Some(redact(&token)),
            error: None,
        }),
        Err(e) => Json(AuthCheckResponse {
            ok: false,
            token: None,
            error: Some(e.to_string()),
        }),
    }
}

/// First few characters of the token, for operational diagnosis only.
fn redact(token: &str) -> String {
    let prefix: String = token.chars().take(6).collect();
    format!("{prefix}…")
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Upstream authentication failed
    Auth { message: String },

    /// Upstream response passed through verbatim (GPS lookup)
    Passthrough { status: u16, body: String },

    /// Anything else
    Internal { message: String },
}

impl From<GiError> for AppError {
    fn from(e: GiError) -> Self {
        match e {
            GiError::Upstream { status, body } => AppError::Passthrough { status, body },
            other if other.is_auth() => AppError::Auth {
                message: other.to_string(),
            },
            other => AppError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Passthrough { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, body).into_response()
            }
            AppError::Auth { message } => {
                error!(%message, "upstream authentication failure");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse { error: message }),
                )
                    .into_response()
            }
            AppError::Internal { message } => {
                error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { error: message }),
                )
                    .into_response()
            }
        }
    }
}
