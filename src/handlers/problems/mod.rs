//! Problem handlers: editor view, run and submit

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Problem routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(handler::get_problem))
        .route("/{id}/run", post(handler::run_code))
        .route("/{id}/submit", post(handler::submit_solution))
}
