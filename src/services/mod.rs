//! Business logic services

pub mod evaluation_service;
pub mod problem_service;
pub mod quiz_service;
pub mod run_service;
pub mod submission_service;

pub use evaluation_service::EvaluationService;
pub use problem_service::ProblemService;
pub use quiz_service::QuizService;
pub use run_service::RunService;
pub use submission_service::SubmissionService;
