//! Run-only execution
//!
//! Executes code once against caller-supplied input for quick feedback.
//! Nothing is compared and nothing is recorded.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    db::ProblemSource,
    error::{AppError, AppResult},
    judge::{Judge, JudgeRequest, trim_display},
    models::Verdict,
    utils::validation::{validate_code, validate_language_id},
};

/// A run-only request
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub code: Option<String>,
    pub language_id: Option<i32>,
    pub stdin: Option<String>,
}

/// Raw execution outcome, passed through without grading
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
    /// Status text as reported by the judge
    pub status: String,
    pub verdict: Verdict,
    pub execution_time: Option<f64>,
    pub memory: Option<i64>,
}

/// Run service for business logic
pub struct RunService;

impl RunService {
    /// Execute `request.code` once with the supplied stdin
    pub async fn run(
        judge: &dyn Judge,
        problems: &dyn ProblemSource,
        problem_id: Uuid,
        request: RunRequest,
    ) -> AppResult<RunReport> {
        let (code, language_id) = match (request.code, request.language_id) {
            (Some(code), Some(language_id)) if validate_code(&code).is_ok() => (code, language_id),
            _ => {
                return Err(AppError::Validation(
                    "Code and language are required.".to_string(),
                ));
            }
        };
        validate_language_id(language_id).map_err(|e| AppError::Validation(e.to_string()))?;

        let stdin = request.stdin.unwrap_or_default();

        if problems.find_problem(problem_id).await?.is_none() {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }

        info!(
            problem_id = %problem_id,
            language_id,
            code_length = code.len(),
            has_input = !stdin.is_empty(),
            "Running code"
        );

        let result = judge
            .execute(JudgeRequest {
                source_code: code,
                language_id,
                stdin,
                expected_output: None,
            })
            .await;

        if !result.success {
            let cause = result
                .error
                .unwrap_or_else(|| "judge call failed".to_string());
            warn!(problem_id = %problem_id, cause = %cause, "Run failed at the judge");
            return Err(AppError::JudgeUnavailable(cause));
        }

        Ok(RunReport {
            success: true,
            output: trim_display(&result.stdout).to_string(),
            error: result.error_output().map(str::to_string),
            status: result.description.clone(),
            verdict: result.verdict,
            execution_time: result.time,
            memory: result.memory,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        db::store::MockProblemSource,
        judge::{JudgeResult, MockJudge},
        models::Problem,
    };

    fn existing_problem() -> MockProblemSource {
        let mut source = MockProblemSource::new();
        source.expect_find_problem().returning(|id| {
            Ok(Some(Problem {
                id,
                quiz_id: Uuid::new_v4(),
                title: "Echo".to_string(),
                description: String::new(),
                starter_code: String::new(),
                solution: String::new(),
                difficulty: "easy".to_string(),
                language_id: 71,
                created_at: Utc::now(),
            }))
        });
        source
    }

    fn request(code: &str, stdin: Option<&str>) -> RunRequest {
        RunRequest {
            code: Some(code.to_string()),
            language_id: Some(71),
            stdin: stdin.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_run_passes_output_through() {
        let mut judge = MockJudge::new();
        judge
            .expect_execute()
            .withf(|r| r.stdin == "world" && r.expected_output.is_none())
            .times(1)
            .returning(|_| {
                let mut result = JudgeResult::completed(
                    Verdict::Accepted,
                    "hello world\r\n\n".to_string(),
                    String::new(),
                );
                result.time = Some(0.02);
                result.memory = Some(3100);
                result
            });

        let report = RunService::run(
            &judge,
            &existing_problem(),
            Uuid::new_v4(),
            request("print('hello', input())", Some("world")),
        )
        .await
        .unwrap();

        assert!(report.success);
        assert_eq!(report.output, "hello world");
        assert_eq!(report.status, "Accepted");
        assert!(report.error.is_none());
        assert_eq!(report.execution_time, Some(0.02));
        assert_eq!(report.memory, Some(3100));
    }

    #[tokio::test]
    async fn test_run_reports_compile_output_as_error() {
        let mut judge = MockJudge::new();
        judge.expect_execute().times(1).returning(|_| {
            let mut result =
                JudgeResult::completed(Verdict::CompilationError, String::new(), String::new());
            result.compile_output = "main.cpp:1: error: expected ';'".to_string();
            result
        });

        let report = RunService::run(
            &judge,
            &existing_problem(),
            Uuid::new_v4(),
            request("int main() { return 0 }", None),
        )
        .await
        .unwrap();

        assert!(report.success);
        assert_eq!(report.verdict, Verdict::CompilationError);
        assert_eq!(report.output, "");
        assert_eq!(report.error.as_deref(), Some("main.cpp:1: error: expected ';'"));
    }

    #[tokio::test]
    async fn test_run_surfaces_judge_failure() {
        let mut judge = MockJudge::new();
        judge
            .expect_execute()
            .times(1)
            .returning(|_| JudgeResult::failure("Judge API connection failed: timed out"));

        let err = RunService::run(
            &judge,
            &existing_problem(),
            Uuid::new_v4(),
            request("print(1)", None),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::JudgeUnavailable(ref cause) if cause.contains("timed out")));
    }

    #[tokio::test]
    async fn test_run_rejects_missing_fields_and_unknown_problem() {
        let judge = MockJudge::new();

        let err = RunService::run(
            &judge,
            &MockProblemSource::new(),
            Uuid::new_v4(),
            RunRequest::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut missing = MockProblemSource::new();
        missing.expect_find_problem().returning(|_| Ok(None));
        let err = RunService::run(&judge, &missing, Uuid::new_v4(), request("print(1)", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
