//! Submission repository
//!
//! Submissions are insert-only: there is deliberately no update or delete.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{NewSubmission, Submission},
};

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Create a new submission
    pub async fn create(pool: &PgPool, new: &NewSubmission) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (
                user_id, problem_id, code, language_id, status, score,
                output, error, execution_time, memory
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new.user_id)
        .bind(new.problem_id)
        .bind(&new.code)
        .bind(new.language_id)
        .bind(new.status.as_str())
        .bind(new.score)
        .bind(&new.output)
        .bind(&new.error)
        .bind(new.execution_time)
        .bind(new.memory)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Find submission by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Submission>> {
        let submission = sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(submission)
    }

    /// List a user's submissions, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &Uuid,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE user_id = $1
            ORDER BY submitted_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM submissions WHERE user_id = $1"#)
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok((submissions, count))
    }
}
