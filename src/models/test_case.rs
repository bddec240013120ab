//! Test case model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Test case database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestCase {
    pub id: Uuid,
    pub problem_id: Uuid,
    pub input: String,
    pub expected_output: String,
    /// Sample cases are shown to students; the rest are hidden
    pub is_sample: bool,
    /// Monotonic insertion counter, defines creation order
    pub position: i64,
    pub created_at: DateTime<Utc>,
}
