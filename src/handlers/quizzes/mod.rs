//! Quiz handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Quiz routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_quizzes))
        .route("/{id}", get(handler::get_quiz))
}
