//! Submission handler implementations

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::{AuthenticatedUser, OptionalAuth},
    services::SubmissionService,
    state::AppState,
    utils::validation::page_bounds,
};

use super::{
    request::ListSubmissionsQuery,
    response::{SubmissionResponse, SubmissionsListResponse},
};

/// List the caller's submissions (paginated)
pub async fn list_submissions(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<SubmissionsListResponse>> {
    let (page, per_page) = page_bounds(query.page, query.per_page);

    let (submissions, total) =
        SubmissionService::list_for_user(state.db(), &auth_user.id, page, per_page).await?;

    Ok(Json(SubmissionsListResponse {
        submissions,
        total,
        page,
        per_page,
    }))
}

/// Get a specific submission
pub async fn get_submission(
    State(state): State<AppState>,
    OptionalAuth(auth_user): OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionResponse>> {
    let viewer = auth_user.as_ref().map(|u| &u.id);
    let submission = SubmissionService::get_submission(state.db(), &id, viewer).await?;
    Ok(Json(submission))
}
