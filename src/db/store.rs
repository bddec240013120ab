//! Storage seams used by the evaluation core

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{ProblemRepository, SubmissionRepository, TestCaseFilter},
    error::AppResult,
    models::{NewSubmission, Problem, Submission, TestCase},
};

/// Read access to problems and their test cases
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProblemSource: Send + Sync {
    async fn find_problem(&self, id: Uuid) -> AppResult<Option<Problem>>;

    /// Test cases in creation order, optionally without sample cases
    async fn list_test_cases(&self, problem_id: Uuid, hidden_only: bool) -> AppResult<Vec<TestCase>>;
}

/// Write access for finished evaluations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn create_submission(&self, submission: NewSubmission) -> AppResult<Submission>;
}

#[async_trait]
impl ProblemSource for PgPool {
    async fn find_problem(&self, id: Uuid) -> AppResult<Option<Problem>> {
        ProblemRepository::find_by_id(self, &id).await
    }

    async fn list_test_cases(&self, problem_id: Uuid, hidden_only: bool) -> AppResult<Vec<TestCase>> {
        let filter = if hidden_only {
            TestCaseFilter::HiddenOnly
        } else {
            TestCaseFilter::All
        };
        ProblemRepository::list_test_cases(self, &problem_id, filter).await
    }
}

#[async_trait]
impl SubmissionSink for PgPool {
    async fn create_submission(&self, submission: NewSubmission) -> AppResult<Submission> {
        SubmissionRepository::create(self, &submission).await
    }
}
