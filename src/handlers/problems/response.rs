//! Problem response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::services::evaluation_service::EvaluationReport;

/// Problem response for the code editor
///
/// Carries only sample test cases; hidden cases and the reference solution
/// never leave the server.
#[derive(Debug, Serialize)]
pub struct ProblemResponse {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub title: String,
    pub description: String,
    pub starter_code: String,
    pub difficulty: String,
    pub language_id: i32,
    pub language_name: Option<&'static str>,
    pub sample_test_cases: Vec<SampleTestCase>,
    pub created_at: DateTime<Utc>,
}

/// Sample test case, shown in full
#[derive(Debug, Serialize)]
pub struct SampleTestCase {
    pub id: Uuid,
    pub input: String,
    pub expected_output: String,
}

/// Submit solution response
#[derive(Debug, Serialize)]
pub struct SubmitSolutionResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: EvaluationReport,
}
