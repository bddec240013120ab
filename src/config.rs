//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! Configuration is loaded once at startup and handed to the components that need it;
//! nothing reads the environment after that.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_FALLBACK_INTERPRETER,
    DEFAULT_FALLBACK_TIMEOUT_SECONDS, DEFAULT_JUDGE_API_HOST, DEFAULT_JUDGE_TIMEOUT_SECONDS,
    DEFAULT_JUDGE_URL, DEFAULT_MAX_SOURCE_BYTES, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    languages,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub judge: JudgeConfig,
    pub fallback: FallbackConfig,
    pub evaluation: EvaluationConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT verification configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// External judge configuration
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,
    /// Optional RapidAPI key; when present the key and host headers are sent
    pub api_key: Option<String>,
    pub api_host: String,
    /// Hard timeout for a single judge request
    pub timeout: Duration,
}

/// Local fallback executor configuration
#[derive(Debug, Clone)]
pub struct FallbackConfig {
    /// Reissue environment-fault internal errors through the local executor
    pub enabled: bool,
    /// Also use the local executor when the judge cannot be reached at all
    pub on_unreachable: bool,
    /// Interpreter binary used to run the source file
    pub interpreter: String,
    /// The single language id the local executor accepts
    pub language_id: i32,
    pub timeout: Duration,
}

/// Which test cases count towards a grade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradingPolicy {
    /// Only non-sample (hidden) test cases are graded
    HiddenOnly,
    /// Every test case of the problem is graded
    All,
}

impl GradingPolicy {
    /// Whether the test-case listing should exclude sample cases
    pub fn hidden_only(&self) -> bool {
        matches!(self, Self::HiddenOnly)
    }
}

impl FromStr for GradingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hidden_only" | "hidden" => Ok(Self::HiddenOnly),
            "all" => Ok(Self::All),
            _ => Err(ConfigError::InvalidValue("GRADING_POLICY".to_string())),
        }
    }
}

/// Evaluation configuration
#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    pub grading_policy: GradingPolicy,
    pub max_source_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            judge: JudgeConfig::from_env()?,
            fallback: FallbackConfig::from_env()?,
            evaluation: EvaluationConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("text") | Err(_) => LogFormat::Text,
            Ok(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        };

        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format,
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
        })
    }
}

impl JudgeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("JUDGE0_API_URL").unwrap_or_else(|_| DEFAULT_JUDGE_URL.to_string());
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: env::var("JUDGE0_API_KEY").ok().filter(|k| !k.is_empty()),
            api_host: env::var("JUDGE0_API_HOST")
                .unwrap_or_else(|_| DEFAULT_JUDGE_API_HOST.to_string()),
            timeout: Duration::from_secs(parse_var(
                "JUDGE0_TIMEOUT_SECONDS",
                DEFAULT_JUDGE_TIMEOUT_SECONDS,
            )?),
        })
    }
}

impl FallbackConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            enabled: parse_var("LOCAL_FALLBACK_ENABLED", true)?,
            on_unreachable: parse_var("LOCAL_FALLBACK_ON_UNREACHABLE", false)?,
            interpreter: env::var("LOCAL_FALLBACK_PYTHON")
                .unwrap_or_else(|_| DEFAULT_FALLBACK_INTERPRETER.to_string()),
            language_id: languages::PYTHON3,
            timeout: Duration::from_secs(parse_var(
                "LOCAL_FALLBACK_TIMEOUT_SECONDS",
                DEFAULT_FALLBACK_TIMEOUT_SECONDS,
            )?),
        })
    }
}

impl EvaluationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            grading_policy: parse_var("GRADING_POLICY", GradingPolicy::HiddenOnly)?,
            max_source_bytes: parse_var("MAX_SOURCE_BYTES", DEFAULT_MAX_SOURCE_BYTES)?,
        })
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
            log_format: LogFormat::Text,
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_grading_policy_parsing() {
        assert_eq!("hidden_only".parse::<GradingPolicy>().unwrap(), GradingPolicy::HiddenOnly);
        assert_eq!(" ALL ".parse::<GradingPolicy>().unwrap(), GradingPolicy::All);
        assert!("samples".parse::<GradingPolicy>().is_err());

        assert!(GradingPolicy::HiddenOnly.hidden_only());
        assert!(!GradingPolicy::All.hidden_only());
    }

    #[test]
    fn test_parse_var_uses_default_when_unset() {
        let value: u64 = parse_var("CODEQUIZ_TEST_SURELY_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
