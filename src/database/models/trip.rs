use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::Destination;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i64,
    pub trip_name: String,
    pub destination_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Trip with its destination resolved, as the trip list returns it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripWithDestination {
    #[serde(flatten)]
    pub trip: Trip,
    pub destination: Destination,
}
