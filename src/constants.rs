//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// JUDGE DEFAULTS
// =============================================================================

/// Default base URL of the external judge
pub const DEFAULT_JUDGE_URL: &str = "http://judge0:2358";

/// Default RapidAPI host header (sent only together with an API key)
pub const DEFAULT_JUDGE_API_HOST: &str = "judge0-ce.p.rapidapi.com";

/// Default per-request timeout for judge calls in seconds
pub const DEFAULT_JUDGE_TIMEOUT_SECONDS: u64 = 20;

/// Default interpreter used by the local fallback executor
pub const DEFAULT_FALLBACK_INTERPRETER: &str = "python3";

/// Default wall-clock limit for the local fallback executor in seconds
pub const DEFAULT_FALLBACK_TIMEOUT_SECONDS: u64 = 10;

/// Internal-error text that points at a broken judge environment rather
/// than at the submitted code
pub const JUDGE_ENVIRONMENT_FAULT_MARKER: &str = "No such file or directory";

// =============================================================================
// EVALUATION DEFAULTS
// =============================================================================

/// Default maximum accepted source size in bytes
pub const DEFAULT_MAX_SOURCE_BYTES: usize = 64 * 1024;

/// Maximum accepted custom stdin size in bytes for run requests
pub const MAX_STDIN_BYTES: u64 = 1024 * 1024;

/// Upper bound for any request body
pub const MAX_REQUEST_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Default page size for submission listings
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound for submission listing page size
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// JUDGE STATUS CODES
// =============================================================================

/// Numeric status identifiers reported by the judge
pub mod judge_status {
    pub const IN_QUEUE: i32 = 1;
    pub const PROCESSING: i32 = 2;
    pub const ACCEPTED: i32 = 3;
    pub const WRONG_ANSWER: i32 = 4;
    pub const TIME_LIMIT_EXCEEDED: i32 = 5;
    pub const COMPILATION_ERROR: i32 = 6;
    pub const RUNTIME_ERROR_SIGSEGV: i32 = 7;
    pub const RUNTIME_ERROR_SIGXFSZ: i32 = 8;
    pub const RUNTIME_ERROR_SIGFPE: i32 = 9;
    pub const RUNTIME_ERROR_SIGABRT: i32 = 10;
    pub const RUNTIME_ERROR_NZEC: i32 = 11;
    pub const RUNTIME_ERROR_OTHER: i32 = 12;
    pub const INTERNAL_ERROR: i32 = 13;
    pub const EXEC_FORMAT_ERROR: i32 = 14;
}

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers understood by the judge
pub mod languages {
    pub const ASSEMBLY: i32 = 45;
    pub const BASH: i32 = 46;
    pub const C: i32 = 50;
    pub const CPP: i32 = 54;
    pub const CSHARP: i32 = 51;
    pub const CLOJURE: i32 = 86;
    pub const ELIXIR: i32 = 57;
    pub const GO: i32 = 60;
    pub const HASKELL: i32 = 61;
    pub const JAVA: i32 = 62;
    pub const JAVASCRIPT: i32 = 63;
    pub const KOTLIN: i32 = 78;
    pub const LUA: i32 = 64;
    pub const PHP: i32 = 68;
    pub const PYTHON2: i32 = 70;
    pub const PYTHON3: i32 = 71;
    pub const R: i32 = 80;
    pub const RUBY: i32 = 72;
    pub const RUST: i32 = 73;
    pub const SCALA: i32 = 81;
    pub const SWIFT: i32 = 83;
    pub const TYPESCRIPT: i32 = 74;

    /// Language used when a problem does not name one
    pub const DEFAULT: i32 = PYTHON3;

    /// All supported language identifiers with their display names
    pub const ALL: &[(i32, &str)] = &[
        (ASSEMBLY, "Assembly (NASM 2.14.02)"),
        (BASH, "Bash (5.0.0)"),
        (C, "C (GCC 9.2.0)"),
        (CPP, "C++ (GCC 9.2.0)"),
        (CSHARP, "C# (Mono 6.6.0.161)"),
        (CLOJURE, "Clojure (1.10.1)"),
        (ELIXIR, "Elixir (1.9.4)"),
        (GO, "Go (1.13.5)"),
        (HASKELL, "Haskell (GHC 8.8.1)"),
        (JAVA, "Java (OpenJDK 13.0.1)"),
        (JAVASCRIPT, "JavaScript (Node.js 12.14.0)"),
        (KOTLIN, "Kotlin (1.3.70)"),
        (LUA, "Lua (5.3.5)"),
        (PHP, "PHP (7.4.1)"),
        (PYTHON2, "Python (2.7.17)"),
        (PYTHON3, "Python (3.8.1)"),
        (R, "R (4.0.0)"),
        (RUBY, "Ruby (2.7.0)"),
        (RUST, "Rust (1.40.0)"),
        (SCALA, "Scala (2.13.2)"),
        (SWIFT, "Swift (5.2.3)"),
        (TYPESCRIPT, "TypeScript (3.7.4)"),
    ];

    /// Display name for a language id, if it is supported
    pub fn name(id: i32) -> Option<&'static str> {
        ALL.iter().find(|(lang, _)| *lang == id).map(|(_, name)| *name)
    }

    /// Whether the judge understands this language id
    pub fn is_supported(id: i32) -> bool {
        name(id).is_some()
    }
}
