//! Quiz service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{ProblemRepository, QuizRepository},
    error::{AppError, AppResult},
    handlers::quizzes::response::{
        QuizDetailResponse, QuizProblemSummary, QuizResponse, QuizzesListResponse,
    },
    models::Quiz,
};

/// Quiz service for business logic
pub struct QuizService;

impl QuizService {
    /// List all quizzes
    pub async fn list_quizzes(pool: &PgPool) -> AppResult<QuizzesListResponse> {
        let quizzes: Vec<QuizResponse> = QuizRepository::list(pool)
            .await?
            .into_iter()
            .map(QuizResponse::from)
            .collect();
        let total = quizzes.len();

        Ok(QuizzesListResponse { quizzes, total })
    }

    /// Get a quiz with its problems in creation order
    pub async fn get_quiz(pool: &PgPool, id: &Uuid) -> AppResult<QuizDetailResponse> {
        let quiz = QuizRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

        let problems = ProblemRepository::list_for_quiz(pool, id)
            .await?
            .into_iter()
            .map(|p| QuizProblemSummary {
                id: p.id,
                title: p.title,
                difficulty: p.difficulty,
                language_id: p.language_id,
            })
            .collect();

        Ok(QuizDetailResponse {
            quiz: QuizResponse::from(quiz),
            problems,
        })
    }
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        let (time_limit_hours, time_limit_minutes) = quiz.time_limit_hours_minutes();
        Self {
            id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            time_limit_hours,
            time_limit_minutes,
            created_at: quiz.created_at,
        }
    }
}
