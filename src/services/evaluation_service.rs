//! Submission evaluation
//!
//! Runs a submission against a problem's graded test cases one at a time,
//! reconciles per-case outcomes into a verdict and score, and records exactly
//! one submission row per completed evaluation.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    config::GradingPolicy,
    db::{ProblemSource, SubmissionSink},
    error::{AppError, AppResult},
    judge::{Judge, JudgeRequest, outputs_match, trim_display},
    models::{NewSubmission, Verdict},
    utils::validation::{validate_code, validate_language_id},
};

/// A graded evaluation request
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub problem_id: Uuid,
    pub code: Option<String>,
    pub language_id: Option<i32>,
    /// Attribution only; anonymous evaluations are allowed
    pub user_id: Option<Uuid>,
}

/// Outcome of one graded test case
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    /// 1-based position in evaluation order
    pub case_number: usize,
    pub test_case_id: Uuid,
    pub is_sample: bool,
    pub status: Verdict,
    /// Status text as reported by the judge
    pub detail: String,
    pub passed: bool,
    /// Input and outputs are only disclosed for sample cases
    pub input: Option<String>,
    pub expected_output: Option<String>,
    pub actual_output: Option<String>,
    pub error: Option<String>,
    pub execution_time: Option<f64>,
    pub memory: Option<i64>,
}

/// Result of a completed evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub submission_id: Uuid,
    pub status: Verdict,
    pub score: i32,
    pub passed_tests: usize,
    pub total_tests: usize,
    pub test_results: Vec<CaseResult>,
}

/// Running totals while walking the test cases
#[derive(Debug, Default)]
struct Tally {
    passed: usize,
    first_failure: Option<Verdict>,
    first_error: Option<String>,
    total_time: Option<f64>,
    peak_memory: Option<i64>,
}

impl Tally {
    fn record_usage(&mut self, time: Option<f64>, memory: Option<i64>) {
        if let Some(t) = time {
            *self.total_time.get_or_insert(0.0) += t;
        }
        if let Some(m) = memory {
            self.peak_memory = Some(self.peak_memory.map_or(m, |peak| peak.max(m)));
        }
    }

    fn verdict(&self) -> Verdict {
        self.first_failure.unwrap_or(Verdict::Accepted)
    }
}

/// Integer percentage of passed cases, rounded down
pub fn score(passed: usize, total: usize) -> i32 {
    if total == 0 {
        return 0;
    }
    (100 * passed / total) as i32
}

/// Evaluation service for business logic
pub struct EvaluationService;

impl EvaluationService {
    /// Grade `request.code` against the problem's eligible test cases
    ///
    /// Cases run strictly in creation order. The first failing case decides
    /// the overall status: its own judge verdict if that was not Accepted,
    /// otherwise Wrong Answer. A failed judge call aborts the evaluation
    /// without recording a submission.
    pub async fn evaluate(
        judge: &dyn Judge,
        problems: &dyn ProblemSource,
        submissions: &dyn SubmissionSink,
        policy: GradingPolicy,
        request: EvaluationRequest,
    ) -> AppResult<EvaluationReport> {
        let (code, language_id) = match (request.code, request.language_id) {
            (Some(code), Some(language_id)) if validate_code(&code).is_ok() => (code, language_id),
            _ => {
                return Err(AppError::Validation(
                    "Code and language are required.".to_string(),
                ));
            }
        };
        validate_language_id(language_id).map_err(|e| AppError::Validation(e.to_string()))?;

        let problem = problems
            .find_problem(request.problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        let cases = problems
            .list_test_cases(problem.id, policy.hidden_only())
            .await?;

        if cases.is_empty() {
            let message = match policy {
                GradingPolicy::HiddenOnly => "This problem has no hidden test cases for evaluation.",
                GradingPolicy::All => "No test cases found for this problem.",
            };
            return Err(AppError::Validation(message.to_string()));
        }

        let total = cases.len();
        info!(
            problem_id = %problem.id,
            language_id,
            total_cases = total,
            "Evaluating submission"
        );

        let mut tally = Tally::default();
        let mut test_results = Vec::with_capacity(total);

        for (index, case) in cases.iter().enumerate() {
            let case_number = index + 1;
            let result = judge
                .execute(JudgeRequest {
                    source_code: code.clone(),
                    language_id,
                    stdin: case.input.clone(),
                    expected_output: Some(case.expected_output.clone()),
                })
                .await;

            if !result.success {
                let cause = result
                    .error
                    .unwrap_or_else(|| "judge call failed".to_string());
                warn!(
                    problem_id = %problem.id,
                    case = case_number,
                    cause = %cause,
                    "Aborting evaluation after judge failure"
                );
                return Err(AppError::JudgeUnavailable(cause));
            }

            let judge_accepted = result.verdict.is_accepted();
            let passed = judge_accepted && outputs_match(&case.expected_output, &result.stdout);

            debug!(
                case = case_number,
                status = %result.verdict,
                passed,
                "Test case judged"
            );

            tally.record_usage(result.time, result.memory);
            if passed {
                tally.passed += 1;
            } else if tally.first_failure.is_none() {
                let verdict = if judge_accepted {
                    Verdict::WrongAnswer
                } else {
                    result.verdict
                };
                tally.first_failure = Some(verdict);
                // Stored errors are public; hidden cases only get a note
                tally.first_error = if case.is_sample {
                    result.error_output().map(str::to_string)
                } else {
                    Some(format!("{} on hidden test case {}", verdict, case_number))
                };
            }

            let reveal = case.is_sample;
            test_results.push(CaseResult {
                case_number,
                test_case_id: case.id,
                is_sample: case.is_sample,
                status: result.verdict,
                detail: result.description.clone(),
                passed,
                input: reveal.then(|| case.input.clone()),
                expected_output: reveal.then(|| case.expected_output.clone()),
                actual_output: reveal.then(|| trim_display(&result.stdout).to_string()),
                error: if reveal {
                    result.error_output().map(str::to_string)
                } else {
                    None
                },
                execution_time: result.time,
                memory: result.memory,
            });
        }

        let status = tally.verdict();
        let score = score(tally.passed, total);

        let submission = submissions
            .create_submission(NewSubmission {
                user_id: request.user_id,
                problem_id: problem.id,
                code,
                language_id,
                status,
                score,
                output: Some(format!("Passed {}/{} test cases", tally.passed, total)),
                error: tally.first_error,
                execution_time: tally.total_time,
                memory: tally.peak_memory,
            })
            .await?;

        info!(
            submission_id = %submission.id,
            status = %status,
            score,
            passed = tally.passed,
            total,
            "Submission evaluated"
        );

        Ok(EvaluationReport {
            submission_id: submission.id,
            status,
            score,
            passed_tests: tally.passed,
            total_tests: total,
            test_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use super::*;
    use crate::{
        db::store::{MockProblemSource, MockSubmissionSink},
        handlers::submissions::response::SubmissionResponse,
        judge::{JudgeResult, MockJudge},
        models::{Problem, Submission, TestCase},
    };

    const PYTHON: i32 = 71;

    fn problem(id: Uuid) -> Problem {
        Problem {
            id,
            quiz_id: Uuid::new_v4(),
            title: "Sum".to_string(),
            description: "Add two numbers".to_string(),
            starter_code: String::new(),
            solution: "print(sum(map(int, input().split())))".to_string(),
            difficulty: "easy".to_string(),
            language_id: PYTHON,
            created_at: Utc::now(),
        }
    }

    fn case(position: i64, input: &str, expected: &str, is_sample: bool) -> TestCase {
        TestCase {
            id: Uuid::new_v4(),
            problem_id: Uuid::nil(),
            input: input.to_string(),
            expected_output: expected.to_string(),
            is_sample,
            position,
            created_at: Utc::now(),
        }
    }

    fn judged(verdict: Verdict, stdout: &str) -> JudgeResult {
        let mut result = JudgeResult::completed(verdict, stdout.to_string(), String::new());
        result.time = Some(0.25);
        result.memory = Some(2048);
        result
    }

    fn stored(new: NewSubmission) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            problem_id: new.problem_id,
            code: new.code,
            language_id: new.language_id,
            status: new.status.as_str().to_string(),
            score: new.score,
            output: new.output,
            error: new.error,
            execution_time: new.execution_time,
            memory: new.memory,
            submitted_at: Utc::now(),
        }
    }

    fn source_with(cases: Vec<TestCase>) -> MockProblemSource {
        let mut source = MockProblemSource::new();
        source
            .expect_find_problem()
            .returning(|id| Ok(Some(problem(id))));
        source
            .expect_list_test_cases()
            .returning(move |_, _| Ok(cases.clone()));
        source
    }

    fn expect_case(judge: &mut MockJudge, stdin: &'static str, result: JudgeResult) {
        judge
            .expect_execute()
            .withf(move |request| request.stdin == stdin)
            .times(1)
            .returning(move |_| result.clone());
    }

    fn recording_sink() -> MockSubmissionSink {
        let mut sink = MockSubmissionSink::new();
        sink.expect_create_submission()
            .times(1)
            .returning(|new| Ok(stored(new)));
        sink
    }

    fn request(code: &str) -> EvaluationRequest {
        EvaluationRequest {
            problem_id: Uuid::new_v4(),
            code: Some(code.to_string()),
            language_id: Some(PYTHON),
            user_id: None,
        }
    }

    #[test]
    fn test_score_rounds_down() {
        assert_eq!(score(2, 3), 66);
        assert_eq!(score(1, 3), 33);
        assert_eq!(score(3, 3), 100);
        assert_eq!(score(0, 4), 0);
    }

    #[tokio::test]
    async fn test_all_cases_accepted() {
        let source = source_with(vec![
            case(1, "1 2", "3", false),
            case(2, "5 5", "10\n", false),
        ]);
        let mut judge = MockJudge::new();
        expect_case(&mut judge, "1 2", judged(Verdict::Accepted, "3\r\n"));
        expect_case(&mut judge, "5 5", judged(Verdict::Accepted, "10"));

        let mut sink = MockSubmissionSink::new();
        let user = Uuid::new_v4();
        sink.expect_create_submission()
            .withf(move |new| {
                new.status == Verdict::Accepted
                    && new.score == 100
                    && new.user_id == Some(user)
                    && new.output.as_deref() == Some("Passed 2/2 test cases")
                    && new.execution_time == Some(0.5)
                    && new.memory == Some(2048)
                    && new.error.is_none()
            })
            .times(1)
            .returning(|new| Ok(stored(new)));

        let mut req = request("print(sum(map(int, input().split())))");
        req.user_id = Some(user);
        let report =
            EvaluationService::evaluate(&judge, &source, &sink, GradingPolicy::HiddenOnly, req)
                .await
                .unwrap();

        assert_eq!(report.status, Verdict::Accepted);
        assert_eq!(report.score, 100);
        assert_eq!(report.passed_tests, 2);
        assert_eq!(report.total_tests, 2);
        assert!(report.test_results.iter().all(|r| r.passed));
    }

    #[tokio::test]
    async fn test_first_failure_status_wins() {
        let source = source_with(vec![
            case(1, "a", "1", false),
            case(2, "b", "2", false),
            case(3, "c", "3", false),
        ]);
        let mut judge = MockJudge::new();
        expect_case(&mut judge, "a", judged(Verdict::TimeLimitExceeded, ""));
        expect_case(&mut judge, "b", judged(Verdict::Accepted, "2"));
        expect_case(&mut judge, "c", judged(Verdict::Accepted, "3"));

        let report = EvaluationService::evaluate(
            &judge,
            &source,
            &recording_sink(),
            GradingPolicy::HiddenOnly,
            request("while True: pass"),
        )
        .await
        .unwrap();

        assert_eq!(report.status, Verdict::TimeLimitExceeded);
        assert_eq!(report.passed_tests, 2);
        assert_eq!(report.score, 66);
    }

    #[tokio::test]
    async fn test_accepted_status_with_wrong_output_is_wrong_answer() {
        let source = source_with(vec![
            case(1, "a", "1", false),
            case(2, "b", "2", false),
            case(3, "c", "3", false),
        ]);
        let mut judge = MockJudge::new();
        expect_case(&mut judge, "a", judged(Verdict::Accepted, "1\n"));
        // Judge claims Accepted on empty output; our comparison disagrees
        expect_case(&mut judge, "b", judged(Verdict::Accepted, ""));
        expect_case(&mut judge, "c", judged(Verdict::CompilationError, ""));

        let mut sink = MockSubmissionSink::new();
        sink.expect_create_submission()
            .withf(|new| new.status == Verdict::WrongAnswer && new.score == 33)
            .times(1)
            .returning(|new| Ok(stored(new)));

        let report = EvaluationService::evaluate(
            &judge,
            &source,
            &sink,
            GradingPolicy::HiddenOnly,
            request("print(1)"),
        )
        .await
        .unwrap();

        assert_eq!(report.status, Verdict::WrongAnswer);
        assert_eq!(report.passed_tests, 1);
        assert_eq!(report.total_tests, 3);
        assert_eq!(report.score, 33);
        assert_eq!(report.test_results[1].status, Verdict::Accepted);
        assert!(!report.test_results[1].passed);
        assert_eq!(report.test_results[2].status, Verdict::CompilationError);
    }

    #[tokio::test]
    async fn test_judge_failure_aborts_without_submission() {
        let source = source_with(vec![
            case(1, "a", "1", false),
            case(2, "b", "2", false),
            case(3, "c", "3", false),
        ]);
        let mut judge = MockJudge::new();
        expect_case(&mut judge, "a", judged(Verdict::Accepted, "1"));
        expect_case(
            &mut judge,
            "b",
            JudgeResult::failure("Judge API connection failed: connection refused"),
        );
        judge
            .expect_execute()
            .withf(|request| request.stdin == "c")
            .never();

        let mut sink = MockSubmissionSink::new();
        sink.expect_create_submission().never();

        let err = EvaluationService::evaluate(
            &judge,
            &source,
            &sink,
            GradingPolicy::HiddenOnly,
            request("print(1)"),
        )
        .await
        .unwrap_err();

        match err {
            AppError::JudgeUnavailable(cause) => assert!(cause.contains("connection refused")),
            other => panic!("expected judge failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_eligible_cases_is_validation_error() {
        let source = source_with(Vec::new());
        let judge = MockJudge::new();
        let mut sink = MockSubmissionSink::new();
        sink.expect_create_submission().never();

        let err = EvaluationService::evaluate(
            &judge,
            &source,
            &sink,
            GradingPolicy::HiddenOnly,
            request("print(1)"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m.contains("no hidden test cases")));
    }

    #[tokio::test]
    async fn test_missing_code_or_language_fails_fast() {
        let source = MockProblemSource::new();
        let judge = MockJudge::new();
        let sink = MockSubmissionSink::new();

        let blank = request("   \n");
        let err = EvaluationService::evaluate(&judge, &source, &sink, GradingPolicy::All, blank)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut no_language = request("print(1)");
        no_language.language_id = None;
        let err =
            EvaluationService::evaluate(&judge, &source, &sink, GradingPolicy::All, no_language)
                .await
                .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let mut unknown_language = request("print(1)");
        unknown_language.language_id = Some(9999);
        let err = EvaluationService::evaluate(
            &judge,
            &source,
            &sink,
            GradingPolicy::All,
            unknown_language,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_problem_is_not_found() {
        let mut source = MockProblemSource::new();
        source.expect_find_problem().returning(|_| Ok(None));
        let judge = MockJudge::new();
        let sink = MockSubmissionSink::new();

        let err = EvaluationService::evaluate(
            &judge,
            &source,
            &sink,
            GradingPolicy::HiddenOnly,
            request("print(1)"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_policy_selects_test_cases() {
        for (policy, hidden_only) in [(GradingPolicy::HiddenOnly, true), (GradingPolicy::All, false)] {
            let mut source = MockProblemSource::new();
            source
                .expect_find_problem()
                .returning(|id| Ok(Some(problem(id))));
            source
                .expect_list_test_cases()
                .withf(move |_, flag| *flag == hidden_only)
                .times(1)
                .returning(|_, _| Ok(vec![case(1, "x", "x", false)]));

            let mut judge = MockJudge::new();
            expect_case(&mut judge, "x", judged(Verdict::Accepted, "x"));

            let report =
                EvaluationService::evaluate(&judge, &source, &recording_sink(), policy, request("echo"))
                    .await
                    .unwrap();
            assert_eq!(report.status, Verdict::Accepted);
        }
    }

    #[tokio::test]
    async fn test_hidden_case_details_are_withheld() {
        let source = source_with(vec![
            case(1, "sample-in", "sample-out", true),
            case(2, "secret-in", "secret-out", false),
        ]);
        let mut judge = MockJudge::new();
        let mut failing = judged(Verdict::RuntimeError, "secret-out-ish");
        failing.stderr = "ValueError: secret-in".to_string();
        expect_case(&mut judge, "sample-in", judged(Verdict::Accepted, "sample-out\n"));
        expect_case(&mut judge, "secret-in", failing);

        let persisted = Arc::new(Mutex::new(None));
        let captured = persisted.clone();
        let mut sink = MockSubmissionSink::new();
        sink.expect_create_submission()
            .withf(|new| {
                new.status == Verdict::RuntimeError
                    && new.error.as_deref() == Some("Runtime Error on hidden test case 2")
            })
            .times(1)
            .returning(move |new| {
                let submission = stored(new);
                *captured.lock().unwrap() = Some(submission.clone());
                Ok(submission)
            });

        let report = EvaluationService::evaluate(
            &judge,
            &source,
            &sink,
            GradingPolicy::All,
            request("print(input())"),
        )
        .await
        .unwrap();

        let sample = &report.test_results[0];
        assert_eq!(sample.input.as_deref(), Some("sample-in"));
        assert_eq!(sample.expected_output.as_deref(), Some("sample-out"));
        assert_eq!(sample.actual_output.as_deref(), Some("sample-out"));

        let hidden = &report.test_results[1];
        assert!(hidden.input.is_none());
        assert!(hidden.expected_output.is_none());
        assert!(hidden.actual_output.is_none());
        assert!(hidden.error.is_none());
        assert_eq!(hidden.status, Verdict::RuntimeError);

        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("secret"));

        // What another user sees from GET /submissions/{id}
        let submission = persisted.lock().unwrap().take().unwrap();
        let public = SubmissionResponse::from_submission(submission, false);
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("Runtime Error on hidden test case 2"));
    }

    #[tokio::test]
    async fn test_sample_case_error_is_persisted() {
        let source = source_with(vec![case(1, "sample-in", "sample-out", true)]);
        let mut judge = MockJudge::new();
        let mut failing = judged(Verdict::RuntimeError, "");
        failing.stderr = "NameError: name 'x' is not defined".to_string();
        expect_case(&mut judge, "sample-in", failing);

        let mut sink = MockSubmissionSink::new();
        sink.expect_create_submission()
            .withf(|new| new.error.as_deref() == Some("NameError: name 'x' is not defined"))
            .times(1)
            .returning(|new| Ok(stored(new)));

        let report = EvaluationService::evaluate(
            &judge,
            &source,
            &sink,
            GradingPolicy::All,
            request("print(x)"),
        )
        .await
        .unwrap();

        assert_eq!(report.status, Verdict::RuntimeError);
    }
}
