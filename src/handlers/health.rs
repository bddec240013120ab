//! Health check and reference data handlers

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::{constants::languages, db, state::AppState};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Judge health response
#[derive(Debug, Serialize)]
pub struct JudgeHealthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Supported language entry
#[derive(Debug, Serialize)]
pub struct LanguageResponse {
    pub id: i32,
    pub name: &'static str,
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, database) = match db::ping(state.db()).await {
        Ok(()) => ("healthy", "connected".to_string()),
        Err(e) => {
            warn!(error = %e, "Database ping failed");
            ("degraded", "unreachable".to_string())
        }
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}

/// Probe the external judge
async fn judge_health(State(state): State<AppState>) -> (StatusCode, Json<JudgeHealthResponse>) {
    match state.judge().health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(JudgeHealthResponse {
                success: true,
                message: Some("Judge is reachable".to_string()),
                error: None,
            }),
        ),
        Err(cause) => {
            warn!(cause = %cause, "Judge health probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(JudgeHealthResponse {
                    success: false,
                    message: None,
                    error: Some(format!("Judge is not reachable: {}", cause)),
                }),
            )
        }
    }
}

/// List languages accepted by Run and Submit
async fn list_languages() -> Json<Vec<LanguageResponse>> {
    Json(
        languages::ALL
            .iter()
            .map(|&(id, name)| LanguageResponse { id, name })
            .collect(),
    )
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/judge/health", get(judge_health))
        .route("/languages", get(list_languages))
}
