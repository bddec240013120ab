//! Code execution through the external judge
//!
//! - [`JudgeClient`] talks to the sandboxed judge over HTTP.
//! - [`LocalExecutor`] is a development-only stand-in for one language,
//!   used when the judge environment is broken.
//! - [`normalize`] reconciles output formatting before comparison.
//!
//! Both executors produce a [`JudgeResult`]; callers never see transport
//! errors as `Err`, only as `success == false`.

pub mod client;
pub mod fallback;
pub mod normalize;

use async_trait::async_trait;
use serde::Serialize;

use crate::models::Verdict;

pub use client::JudgeClient;
pub use fallback::LocalExecutor;
pub use normalize::{normalize_output, outputs_match, trim_display};

/// One source + input pair to execute
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeRequest {
    pub source_code: String,
    pub language_id: i32,
    pub stdin: String,
    pub expected_output: Option<String>,
}

/// Outcome of a single judge invocation
#[derive(Debug, Clone, Serialize)]
pub struct JudgeResult {
    /// `false` when the call itself failed; the verdict is then meaningless
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub compile_output: String,
    pub verdict: Verdict,
    /// Status text as reported by the executor
    pub description: String,
    /// Execution time in seconds
    pub time: Option<f64>,
    /// Memory usage in kilobytes
    pub memory: Option<i64>,
    /// Human-readable cause when `success` is `false`
    pub error: Option<String>,
}

impl JudgeResult {
    /// Create a failed call result
    pub fn failure(cause: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: String::new(),
            compile_output: String::new(),
            verdict: Verdict::SystemError,
            description: Verdict::SystemError.as_str().to_string(),
            time: None,
            memory: None,
            error: Some(cause.into()),
        }
    }

    /// Create a completed call result
    pub fn completed(verdict: Verdict, stdout: String, stderr: String) -> Self {
        Self {
            success: true,
            stdout,
            stderr,
            compile_output: String::new(),
            verdict,
            description: verdict.as_str().to_string(),
            time: None,
            memory: None,
            error: None,
        }
    }

    /// Error text worth showing: runtime stderr first, then compiler output
    pub fn error_output(&self) -> Option<&str> {
        [self.stderr.as_str(), self.compile_output.as_str()]
            .into_iter()
            .find(|s| !s.trim().is_empty())
    }
}

/// Anything that can execute a [`JudgeRequest`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Judge: Send + Sync {
    /// Execute one request, blocking until a verdict or a failure
    async fn execute(&self, request: JudgeRequest) -> JudgeResult;
}
