use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Directed edge: `followed_by_id` follows `following_id`.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub id: i64,
    pub followed_by_id: i64,
    pub following_id: i64,
    pub created_at: DateTime<Utc>,
}
