//! CodeQuiz - Submission Evaluation Service
//!
//! Backend for a coding-quiz platform: learners run code against custom
//! input and submit solutions that are graded against a problem's test
//! cases through an external sandboxed judge.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Evaluation, run-only execution and read views
//! - **Judge**: Judge client, local fallback executor, output normalizer
//! - **Repositories**: Database access
//! - **Models**: Domain models and verdicts

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

use axum::{middleware::from_fn_with_state, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the application router with all middleware layers
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .layer(from_fn_with_state(
            state.clone(),
            middleware::optional_auth_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(constants::MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
