//! HTTP client for the external judge
//!
//! Submissions are sent synchronously (`wait=true`) one at a time. Every
//! failure is reported through [`JudgeResult::failure`], never retried.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::config::{Config, JudgeConfig};
use crate::constants::{JUDGE_ENVIRONMENT_FAULT_MARKER, judge_status};
use crate::models::Verdict;

use super::{Judge, JudgeRequest, JudgeResult, LocalExecutor};

/// Stateless client for the judge's submission API
pub struct JudgeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    api_host: String,
    fallback: Option<LocalExecutor>,
    fallback_on_unreachable: bool,
}

/// Failures below the judge protocol
#[derive(Debug, thiserror::Error)]
enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("judge responded with HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed judge response: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct SubmissionPayload<'a> {
    source_code: &'a str,
    language_id: i32,
    stdin: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected_output: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SubmissionReply {
    stdout: Option<String>,
    stderr: Option<String>,
    compile_output: Option<String>,
    message: Option<String>,
    status: Option<StatusReply>,
    time: Option<Seconds>,
    memory: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct StatusReply {
    id: i32,
    #[serde(default)]
    description: String,
}

/// The judge reports time as a decimal string, some proxies as a number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Seconds {
    Text(String),
    Number(f64),
}

impl Seconds {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Number(n) => Some(*n),
        }
    }
}

impl JudgeClient {
    /// Create a client; `fallback` is only consulted for its own language
    pub fn new(
        config: &JudgeConfig,
        fallback: Option<LocalExecutor>,
        fallback_on_unreachable: bool,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
            fallback,
            fallback_on_unreachable,
        })
    }

    /// Create a client with the fallback wired according to configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let fallback = config
            .fallback
            .enabled
            .then(|| LocalExecutor::from_config(&config.fallback));

        Self::new(&config.judge, fallback, config.fallback.on_unreachable)
    }

    /// Probe the judge; `Err` carries the reason it is not usable
    pub async fn health(&self) -> Result<(), String> {
        let response = self
            .authorize(self.http.get(format!("{}/about", self.base_url)))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("judge responded with HTTP {}", response.status()))
        }
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder
                .header("X-RapidAPI-Key", key)
                .header("X-RapidAPI-Host", &self.api_host),
            None => builder,
        }
    }

    fn fallback_for(&self, language_id: i32) -> Option<&LocalExecutor> {
        self.fallback.as_ref().filter(|f| f.supports(language_id))
    }

    async fn submit(&self, request: &JudgeRequest) -> Result<SubmissionReply, TransportError> {
        let payload = SubmissionPayload {
            source_code: &request.source_code,
            language_id: request.language_id,
            stdin: &request.stdin,
            expected_output: request.expected_output.as_deref(),
        };

        let response = self
            .authorize(self.http.post(format!("{}/submissions", self.base_url)))
            .query(&[("base64_encoded", "false"), ("wait", "true")])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl Judge for JudgeClient {
    async fn execute(&self, request: JudgeRequest) -> JudgeResult {
        debug!(
            language_id = request.language_id,
            code_length = request.source_code.len(),
            stdin_length = request.stdin.len(),
            "Sending code to judge"
        );

        let reply = match self.submit(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "Judge API request failed");
                if self.fallback_on_unreachable {
                    if let Some(fallback) = self.fallback_for(request.language_id) {
                        warn!("Judge unreachable, running locally");
                        return fallback.execute(&request.source_code, &request.stdin).await;
                    }
                }
                return JudgeResult::failure(format!("Judge API connection failed: {}", e));
            }
        };

        let Some(status) = reply.status else {
            return JudgeResult::failure("Judge API connection failed: response has no status");
        };

        if status.id == judge_status::INTERNAL_ERROR {
            let message = reply
                .message
                .unwrap_or_else(|| "Unknown internal error".to_string());

            if !message.contains(JUDGE_ENVIRONMENT_FAULT_MARKER) {
                warn!(message = %message, "Judge internal error");
                return JudgeResult::failure(format!("Judge internal error: {}", message));
            }

            if let Some(fallback) = self.fallback_for(request.language_id) {
                warn!(message = %message, "Judge environment fault, running locally");
                return fallback.execute(&request.source_code, &request.stdin).await;
            }

            warn!(message = %message, "Judge environment fault, no local fallback");
            return JudgeResult::failure(
                "Code execution environment is not properly configured. \
                 Judge container needs additional setup.",
            );
        }

        JudgeResult {
            success: true,
            stdout: reply.stdout.unwrap_or_default(),
            stderr: reply.stderr.unwrap_or_default(),
            compile_output: reply.compile_output.unwrap_or_default(),
            verdict: Verdict::from_judge_status(status.id),
            description: status.description,
            time: reply.time.as_ref().and_then(Seconds::value),
            memory: reply.memory.map(|m| m as i64),
            error: None,
        }
    }
}
