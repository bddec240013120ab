//! Problem repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::{Problem, TestCase}};

/// Which test cases of a problem to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestCaseFilter {
    All,
    SamplesOnly,
    HiddenOnly,
}

impl TestCaseFilter {
    fn is_sample(&self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::SamplesOnly => Some(true),
            Self::HiddenOnly => Some(false),
        }
    }
}

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Find problem by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(problem)
    }

    /// List problems of a quiz in creation order
    pub async fn list_for_quiz(pool: &PgPool, quiz_id: &Uuid) -> AppResult<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"SELECT * FROM problems WHERE quiz_id = $1 ORDER BY created_at, id"#,
        )
        .bind(quiz_id)
        .fetch_all(pool)
        .await?;

        Ok(problems)
    }

    /// List test cases for a problem in creation order
    pub async fn list_test_cases(
        pool: &PgPool,
        problem_id: &Uuid,
        filter: TestCaseFilter,
    ) -> AppResult<Vec<TestCase>> {
        let test_cases = sqlx::query_as::<_, TestCase>(
            r#"
            SELECT * FROM test_cases
            WHERE problem_id = $1
                AND ($2::bool IS NULL OR is_sample = $2)
            ORDER BY position
            "#,
        )
        .bind(problem_id)
        .bind(filter.is_sample())
        .fetch_all(pool)
        .await?;

        Ok(test_cases)
    }
}
