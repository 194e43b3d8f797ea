use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: i64,
    pub destination_name: String,
    pub created_at: DateTime<Utc>,
}
