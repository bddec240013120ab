//! Quiz handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{error::AppResult, services::QuizService, state::AppState};

use super::response::{QuizDetailResponse, QuizzesListResponse};

/// List all quizzes
pub async fn list_quizzes(State(state): State<AppState>) -> AppResult<Json<QuizzesListResponse>> {
    let quizzes = QuizService::list_quizzes(state.db()).await?;
    Ok(Json(quizzes))
}

/// Get a quiz and its problems
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<QuizDetailResponse>> {
    let quiz = QuizService::get_quiz(state.db(), &id).await?;
    Ok(Json(quiz))
}
