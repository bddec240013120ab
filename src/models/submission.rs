//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::judge_status;

/// Submission database model
///
/// Rows are written once by the evaluation service and never updated.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    /// `None` for anonymous evaluations
    pub user_id: Option<Uuid>,
    pub problem_id: Uuid,
    #[serde(skip_serializing)]
    pub code: String,
    pub language_id: i32,
    pub status: String,
    pub score: i32,
    pub output: Option<String>,
    pub error: Option<String>,
    /// Summed execution time across graded cases, in seconds
    pub execution_time: Option<f64>,
    /// Peak memory across graded cases, in kilobytes
    pub memory: Option<i64>,
    pub submitted_at: DateTime<Utc>,
}

/// Values for a submission row about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub user_id: Option<Uuid>,
    pub problem_id: Uuid,
    pub code: String,
    pub language_id: i32,
    pub status: Verdict,
    pub score: i32,
    pub output: Option<String>,
    pub error: Option<String>,
    pub execution_time: Option<f64>,
    pub memory: Option<i64>,
}

/// Verdict of a single execution or of a whole evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Accepted")]
    Accepted,
    #[serde(rename = "Wrong Answer")]
    WrongAnswer,
    #[serde(rename = "Time Limit Exceeded")]
    TimeLimitExceeded,
    #[serde(rename = "Compilation Error")]
    CompilationError,
    #[serde(rename = "Runtime Error")]
    RuntimeError,
    #[serde(rename = "In Queue")]
    InQueue,
    #[serde(rename = "Processing")]
    Processing,
    #[serde(rename = "Internal Error")]
    InternalError,
    #[serde(rename = "Exec Format Error")]
    ExecFormatError,
    /// The judge could not be used at all
    #[serde(rename = "System Error")]
    SystemError,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Verdict {
    /// Get verdict as its display label (also the stored form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "Wrong Answer",
            Self::TimeLimitExceeded => "Time Limit Exceeded",
            Self::CompilationError => "Compilation Error",
            Self::RuntimeError => "Runtime Error",
            Self::InQueue => "In Queue",
            Self::Processing => "Processing",
            Self::InternalError => "Internal Error",
            Self::ExecFormatError => "Exec Format Error",
            Self::SystemError => "System Error",
            Self::Unknown => "Unknown",
        }
    }

    /// Map the judge's numeric status id into a verdict
    pub fn from_judge_status(id: i32) -> Self {
        match id {
            judge_status::IN_QUEUE => Self::InQueue,
            judge_status::PROCESSING => Self::Processing,
            judge_status::ACCEPTED => Self::Accepted,
            judge_status::WRONG_ANSWER => Self::WrongAnswer,
            judge_status::TIME_LIMIT_EXCEEDED => Self::TimeLimitExceeded,
            judge_status::COMPILATION_ERROR => Self::CompilationError,
            judge_status::RUNTIME_ERROR_SIGSEGV..=judge_status::RUNTIME_ERROR_OTHER => {
                Self::RuntimeError
            }
            judge_status::INTERNAL_ERROR => Self::InternalError,
            judge_status::EXEC_FORMAT_ERROR => Self::ExecFormatError,
            _ => Self::Unknown,
        }
    }

    /// Check if this verdict means the solution was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_judge_status_mapping() {
        assert_eq!(Verdict::from_judge_status(3), Verdict::Accepted);
        assert_eq!(Verdict::from_judge_status(4), Verdict::WrongAnswer);
        assert_eq!(Verdict::from_judge_status(5), Verdict::TimeLimitExceeded);
        assert_eq!(Verdict::from_judge_status(6), Verdict::CompilationError);
        for id in 7..=12 {
            assert_eq!(Verdict::from_judge_status(id), Verdict::RuntimeError);
        }
        assert_eq!(Verdict::from_judge_status(13), Verdict::InternalError);
        assert_eq!(Verdict::from_judge_status(14), Verdict::ExecFormatError);
        assert_eq!(Verdict::from_judge_status(99), Verdict::Unknown);
    }

    #[test]
    fn test_label_matches_serde() {
        let json = serde_json::to_string(&Verdict::TimeLimitExceeded).unwrap();
        assert_eq!(json, "\"Time Limit Exceeded\"");
        for verdict in [Verdict::WrongAnswer, Verdict::ExecFormatError, Verdict::SystemError] {
            let json = serde_json::to_string(&verdict).unwrap();
            assert_eq!(json, format!("\"{}\"", verdict.as_str()));
        }
    }
}
