//! Submission request DTOs

use serde::Deserialize;

/// List submissions query
#[derive(Debug, Deserialize)]
pub struct ListSubmissionsQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
