//! Quiz model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Quiz database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Time allowed for the whole quiz, in seconds
    pub time_limit_seconds: i32,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    /// Split the time limit into whole hours and remaining minutes
    pub fn time_limit_hours_minutes(&self) -> (i32, i32) {
        let secs = self.time_limit_seconds.max(0);
        (secs / 3600, (secs % 3600) / 60)
    }
}
