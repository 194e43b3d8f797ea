//! Destination mutation. Admin-intent routes: the schema has no role or
//! permission column, so any authenticated user may call these, matching the
//! original surface. See DESIGN.md before hardening.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::database::models::{Destination, PostDetail};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::store::{destinations, posts};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationBody {
    pub destination_name: Option<String>,
}

impl DestinationBody {
    fn name(self) -> Result<String, ApiError> {
        self.destination_name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ApiError::field_error("destinationName", "destination name required"))
    }
}

/// POST /account/destinations
pub async fn create(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
    Json(payload): Json<DestinationBody>,
) -> ApiResult<Destination> {
    let name = payload.name()?;
    let destination = destinations::insert(&state.db, &name).await?;
    Ok(ApiResponse::created(destination))
}

/// PATCH /account/destinations/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<DestinationBody>,
) -> ApiResult<Destination> {
    let name = payload.name()?;
    let destination = destinations::update_name(&state.db, id, &name).await?;
    Ok(ApiResponse::success(destination))
}

/// DELETE /account/destinations/:id - refused with 409 while trips or posts
/// still reference the destination.
pub async fn delete(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    destinations::delete(&state.db, id).await?;
    Ok(ApiResponse::no_content())
}

/// GET /account/destinations/:id/posts - posts attached to a destination.
pub async fn list_posts(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<PostDetail>> {
    destinations::by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("destination not found"))?;
    let destination_posts = posts::list_by_destination(&state.db, id).await?;
    Ok(ApiResponse::success(destination_posts))
}
