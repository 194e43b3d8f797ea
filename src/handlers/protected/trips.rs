use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::auth::policy;
use crate::database::models::{Trip, TripWithDestination};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::store::{destinations, trips, StoreError};

/// GET /account/trips - the user's trips with destinations resolved.
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<TripWithDestination>> {
    let user_trips = trips::list_by_user(&state.db, auth_user.user_id).await?;
    Ok(ApiResponse::success(user_trips))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripCreate {
    pub trip_name: Option<String>,
    pub destination_id: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// POST /account/trips - create a trip owned by the authenticated user.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<TripCreate>,
) -> ApiResult<Trip> {
    let mut field_errors = HashMap::new();
    if payload.trip_name.as_deref().unwrap_or_default().is_empty() {
        field_errors.insert("tripName".to_string(), "tripName is required".to_string());
    }
    if payload.destination_id.is_none() {
        field_errors.insert(
            "destinationId".to_string(),
            "destinationId is required".to_string(),
        );
    }
    if payload.start_date.is_none() {
        field_errors.insert("startDate".to_string(), "startDate is required".to_string());
    }
    if payload.end_date.is_none() {
        field_errors.insert("endDate".to_string(), "endDate is required".to_string());
    }
    if !field_errors.is_empty() {
        return Err(ApiError::field_errors("invalid trip", field_errors));
    }

    let destination_id = payload.destination_id.unwrap();
    // Dangling reference fails before any row is written
    destinations::by_id(&state.db, destination_id)
        .await?
        .ok_or_else(|| ApiError::field_error("destinationId", "invalid destination"))?;

    let trip = trips::insert(
        &state.db,
        trips::NewTrip {
            trip_name: payload.trip_name.unwrap(),
            destination_id,
            start_date: payload.start_date.unwrap(),
            end_date: payload.end_date.unwrap(),
            user_id: auth_user.user_id,
        },
    )
    .await?;

    Ok(ApiResponse::created(trip))
}

/// Explicit patch shape for PUT /account/trips/:id. Omitted fields keep
/// their prior values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPatch {
    pub trip_name: Option<String>,
    pub destination_id: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl TripPatch {
    pub fn apply(self, trip: &mut Trip) {
        if let Some(trip_name) = self.trip_name {
            trip.trip_name = trip_name;
        }
        if let Some(destination_id) = self.destination_id {
            trip.destination_id = destination_id;
        }
        if let Some(start_date) = self.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            trip.end_date = end_date;
        }
    }
}

/// PUT /account/trips/:id - merge-patch a trip the user owns.
pub async fn update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(patch): Json<TripPatch>,
) -> ApiResult<Trip> {
    let mut tx = state.db.begin().await.map_err(StoreError::from)?;

    let mut trip = trips::by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| ApiError::not_found("trip not found"))?;
    policy::ensure_owner(auth_user.user_id, trip.user_id, "trip")?;

    if let Some(destination_id) = patch.destination_id {
        destinations::by_id(&mut *tx, destination_id)
            .await?
            .ok_or_else(|| ApiError::field_error("destinationId", "invalid destination"))?;
    }

    patch.apply(&mut trip);
    let updated = trips::update(&mut *tx, &trip).await?;

    tx.commit().await.map_err(StoreError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /account/trips/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    let mut tx = state.db.begin().await.map_err(StoreError::from)?;

    let trip = trips::by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| ApiError::not_found("trip not found"))?;
    policy::ensure_owner(auth_user.user_id, trip.user_id, "trip")?;

    trips::delete(&mut *tx, id).await?;
    tx.commit().await.map_err(StoreError::from)?;

    Ok(ApiResponse::success(
        json!({ "message": "Trip deleted successfully" }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_trip() -> Trip {
        Trip {
            id: 9,
            trip_name: "Summer".to_string(),
            destination_id: 2,
            start_date: "2025-06-01T00:00:00Z".parse().unwrap(),
            end_date: "2025-06-14T00:00:00Z".parse().unwrap(),
            user_id: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn patch_merges_only_provided_fields() {
        let mut trip = existing_trip();
        let patch = TripPatch {
            trip_name: Some("Summer, extended".to_string()),
            end_date: Some("2025-06-21T00:00:00Z".parse().unwrap()),
            ..Default::default()
        };
        patch.apply(&mut trip);

        let new_end: DateTime<Utc> = "2025-06-21T00:00:00Z".parse().unwrap();
        let old_start: DateTime<Utc> = "2025-06-01T00:00:00Z".parse().unwrap();
        assert_eq!(trip.trip_name, "Summer, extended");
        assert_eq!(trip.end_date, new_end);
        // Untouched fields keep their prior values
        assert_eq!(trip.destination_id, 2);
        assert_eq!(trip.start_date, old_start);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut trip = existing_trip();
        TripPatch::default().apply(&mut trip);
        assert_eq!(trip.trip_name, "Summer");
        assert_eq!(trip.destination_id, 2);
    }
}
