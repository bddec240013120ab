//! Problem service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::languages,
    db::repositories::{ProblemRepository, TestCaseFilter},
    error::{AppError, AppResult},
    handlers::problems::response::{ProblemResponse, SampleTestCase},
};

/// Problem service for business logic
pub struct ProblemService;

impl ProblemService {
    /// Get a problem with its sample test cases
    pub async fn get_problem(pool: &PgPool, id: &Uuid) -> AppResult<ProblemResponse> {
        let problem = ProblemRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        let samples =
            ProblemRepository::list_test_cases(pool, id, TestCaseFilter::SamplesOnly).await?;

        Ok(ProblemResponse {
            id: problem.id,
            quiz_id: problem.quiz_id,
            title: problem.title,
            description: problem.description,
            starter_code: problem.starter_code,
            difficulty: problem.difficulty,
            language_id: problem.language_id,
            language_name: languages::name(problem.language_id),
            sample_test_cases: samples
                .into_iter()
                .map(|tc| SampleTestCase {
                    id: tc.id,
                    input: tc.input,
                    expected_output: tc.expected_output,
                })
                .collect(),
            created_at: problem.created_at,
        })
    }
}
