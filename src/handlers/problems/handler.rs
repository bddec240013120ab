//! Problem handler implementations

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::OptionalAuth,
    services::{
        evaluation_service::EvaluationRequest, run_service::{RunReport, RunRequest},
        EvaluationService, ProblemService, RunService,
    },
    state::AppState,
    utils::validation::validate_source_size,
};

use super::{
    request::{RunCodeRequest, SubmitSolutionRequest},
    response::{ProblemResponse, SubmitSolutionResponse},
};

/// Get a problem with its sample test cases
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProblemResponse>> {
    let problem = ProblemService::get_problem(state.db(), &id).await?;
    Ok(Json(problem))
}

/// Run code against custom input without grading
pub async fn run_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RunCodeRequest>,
) -> AppResult<Json<RunReport>> {
    payload.validate()?;
    check_source_size(&state, payload.code.as_deref())?;

    let report = RunService::run(
        state.judge(),
        state.db(),
        id,
        RunRequest {
            code: payload.code,
            language_id: payload.language_id,
            stdin: payload.input,
        },
    )
    .await?;

    Ok(Json(report))
}

/// Grade a solution against the problem's test cases
pub async fn submit_solution(
    State(state): State<AppState>,
    OptionalAuth(auth_user): OptionalAuth,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitSolutionRequest>,
) -> AppResult<Json<SubmitSolutionResponse>> {
    payload.validate()?;
    check_source_size(&state, payload.code.as_deref())?;

    let report = EvaluationService::evaluate(
        state.judge(),
        state.db(),
        state.db(),
        state.config().evaluation.grading_policy,
        EvaluationRequest {
            problem_id: id,
            code: payload.code,
            language_id: payload.language_id,
            user_id: auth_user.map(|u| u.id),
        },
    )
    .await?;

    Ok(Json(SubmitSolutionResponse {
        success: true,
        report,
    }))
}

fn check_source_size(state: &AppState, code: Option<&str>) -> AppResult<()> {
    match code {
        Some(code) => validate_source_size(code, state.config().evaluation.max_source_bytes)
            .map_err(AppError::Validation),
        None => Ok(()),
    }
}
