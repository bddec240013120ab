//! Submission response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Submission;

/// Submission response
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub submission_id: Uuid,
    pub problem_id: Uuid,
    pub language_id: i32,
    pub status: String,
    pub score: i32,
    pub output: Option<String>,
    pub error: Option<String>,
    pub execution_time: Option<f64>,
    pub memory: Option<i64>,
    pub submitted_at: DateTime<Utc>,
    /// Only present for the submitting user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl SubmissionResponse {
    /// Build a response, revealing the source only when `with_code` is set
    pub fn from_submission(submission: Submission, with_code: bool) -> Self {
        Self {
            submission_id: submission.id,
            problem_id: submission.problem_id,
            language_id: submission.language_id,
            status: submission.status,
            score: submission.score,
            output: submission.output,
            error: submission.error,
            execution_time: submission.execution_time,
            memory: submission.memory,
            submitted_at: submission.submitted_at,
            code: with_code.then_some(submission.code),
        }
    }
}

/// Submission list response
#[derive(Debug, Serialize)]
pub struct SubmissionsListResponse {
    pub submissions: Vec<SubmissionResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> Submission {
        Submission {
            id: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
            problem_id: Uuid::new_v4(),
            code: "print(42)".to_string(),
            language_id: 71,
            status: "Accepted".to_string(),
            score: 100,
            output: Some("Passed 3/3 test cases".to_string()),
            error: None,
            execution_time: Some(0.12),
            memory: Some(9000),
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_code_hidden_from_other_viewers() {
        let json = serde_json::to_value(SubmissionResponse::from_submission(submission(), false))
            .unwrap();
        assert!(json.get("code").is_none());
        assert_eq!(json["status"], "Accepted");

        let json = serde_json::to_value(SubmissionResponse::from_submission(submission(), true))
            .unwrap();
        assert_eq!(json["code"], "print(42)");
    }
}
