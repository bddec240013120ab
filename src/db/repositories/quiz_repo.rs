//! Quiz repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Quiz};

/// Repository for quiz database operations
pub struct QuizRepository;

impl QuizRepository {
    /// List all quizzes, newest first
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(r#"SELECT * FROM quizzes ORDER BY created_at DESC"#)
            .fetch_all(pool)
            .await?;

        Ok(quizzes)
    }

    /// Find quiz by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(r#"SELECT * FROM quizzes WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(quiz)
    }
}
