use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};
use std::collections::HashMap;

use super::{write_violation, StoreError};
use crate::database::models::{Destination, Trip, TripWithDestination};

pub struct NewTrip {
    pub trip_name: String,
    pub destination_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub user_id: i64,
}

pub async fn insert(ex: impl PgExecutor<'_>, new_trip: NewTrip) -> Result<Trip, StoreError> {
    sqlx::query_as::<_, Trip>(
        "INSERT INTO trips (trip_name, destination_id, start_date, end_date, user_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(&new_trip.trip_name)
    .bind(new_trip.destination_id)
    .bind(new_trip.start_date)
    .bind(new_trip.end_date)
    .bind(new_trip.user_id)
    .fetch_one(ex)
    .await
    .map_err(write_violation)
}

/// Row-locked read for update and delete flows.
pub async fn by_id_for_update(
    ex: impl PgExecutor<'_>,
    id: i64,
) -> Result<Option<Trip>, StoreError> {
    let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(trip)
}

/// Write back a full row; partial-update merging happens in the handler.
pub async fn update(ex: impl PgExecutor<'_>, trip: &Trip) -> Result<Trip, StoreError> {
    sqlx::query_as::<_, Trip>(
        "UPDATE trips
         SET trip_name = $2, destination_id = $3, start_date = $4, end_date = $5
         WHERE id = $1
         RETURNING *",
    )
    .bind(trip.id)
    .bind(&trip.trip_name)
    .bind(trip.destination_id)
    .bind(trip.start_date)
    .bind(trip.end_date)
    .fetch_one(ex)
    .await
    .map_err(write_violation)
}

pub async fn delete(ex: impl PgExecutor<'_>, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM trips WHERE id = $1")
        .bind(id)
        .execute(ex)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("trip"));
    }
    Ok(())
}

/// Bare trip rows owned by a user (the account aggregate needs these without
/// the destination join).
pub async fn list_rows_by_user(
    ex: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Vec<Trip>, StoreError> {
    let trips = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE user_id = $1 ORDER BY id")
        .bind(user_id)
        .fetch_all(ex)
        .await?;
    Ok(trips)
}

/// Trips owned by a user with each destination resolved.
pub async fn list_by_user(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<TripWithDestination>, StoreError> {
    let trips = list_rows_by_user(pool, user_id).await?;

    let destination_ids: Vec<i64> = trips.iter().map(|t| t.destination_id).collect();
    let destinations = sqlx::query_as::<_, Destination>(
        "SELECT * FROM destinations WHERE id = ANY($1)",
    )
    .bind(&destination_ids)
    .fetch_all(pool)
    .await?;
    let by_id: HashMap<i64, Destination> =
        destinations.into_iter().map(|d| (d.id, d)).collect();

    let mut detailed = Vec::with_capacity(trips.len());
    for trip in trips {
        let destination = by_id
            .get(&trip.destination_id)
            .cloned()
            .ok_or(StoreError::NotFound("destination"))?;
        detailed.push(TripWithDestination { trip, destination });
    }
    Ok(detailed)
}
