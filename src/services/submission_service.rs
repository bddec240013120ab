//! Submission service
//!
//! Read side of recorded evaluations. Rows are created only by
//! [`EvaluationService`](super::EvaluationService).

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::SubmissionRepository,
    error::{AppError, AppResult},
    handlers::submissions::response::SubmissionResponse,
};

/// Submission service for business logic
pub struct SubmissionService;

impl SubmissionService {
    /// Get submission by ID
    ///
    /// The source code is included only when `viewer` submitted it.
    pub async fn get_submission(
        pool: &PgPool,
        id: &Uuid,
        viewer: Option<&Uuid>,
    ) -> AppResult<SubmissionResponse> {
        let submission = SubmissionRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        let is_owner = matches!(
            (submission.user_id.as_ref(), viewer),
            (Some(owner), Some(viewer)) if owner == viewer
        );

        Ok(SubmissionResponse::from_submission(submission, is_owner))
    }

    /// List a user's submissions, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &Uuid,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<SubmissionResponse>, i64)> {
        let offset = (page - 1) * per_page;
        let (submissions, total) =
            SubmissionRepository::list_for_user(pool, user_id, offset, per_page).await?;

        let submissions = submissions
            .into_iter()
            .map(|s| SubmissionResponse::from_submission(s, true))
            .collect();

        Ok((submissions, total))
    }
}
