//! Quiz response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Quiz response
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub time_limit_hours: i32,
    pub time_limit_minutes: i32,
    pub created_at: DateTime<Utc>,
}

/// Quiz list response
#[derive(Debug, Serialize)]
pub struct QuizzesListResponse {
    pub quizzes: Vec<QuizResponse>,
    pub total: usize,
}

/// Quiz with its problems
#[derive(Debug, Serialize)]
pub struct QuizDetailResponse {
    #[serde(flatten)]
    pub quiz: QuizResponse,
    pub problems: Vec<QuizProblemSummary>,
}

/// Problem summary inside a quiz
#[derive(Debug, Serialize)]
pub struct QuizProblemSummary {
    pub id: Uuid,
    pub title: String,
    pub difficulty: String,
    pub language_id: i32,
}
