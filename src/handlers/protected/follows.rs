use axum::{
    extract::{Path, State},
    Extension,
};
use serde_json::{json, Value};

use crate::database::models::Follow;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::store::{follows, users, StoreError};

/// POST /account/users/:id/follows - follow another user.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Follow> {
    // Existence before anything else
    users::by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    if id == auth_user.user_id {
        return Err(ApiError::validation_error("cannot follow yourself"));
    }

    let follow = follows::insert(&state.db, auth_user.user_id, id)
        .await
        .map_err(|err| match err {
            StoreError::Duplicate("follow") => ApiError::conflict("already following this user"),
            other => ApiError::from(other),
        })?;

    Ok(ApiResponse::created(follow))
}

/// DELETE /account/users/:id/follows - unfollow.
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    follows::delete_edge(&state.db, auth_user.user_id, id).await?;
    Ok(ApiResponse::success(
        json!({ "message": "Follow deleted successfully" }),
    ))
}

/// GET /account/follows - edges where the user appears on either side.
pub async fn list_follows(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Follow>> {
    let edges = follows::list_either_side(&state.db, auth_user.user_id).await?;
    Ok(ApiResponse::success(edges))
}

/// GET /account/following - accounts the user follows.
pub async fn list_following(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Follow>> {
    let edges = follows::list_as_follower(&state.db, auth_user.user_id).await?;
    Ok(ApiResponse::success(edges))
}

/// GET /account/followedBy - the user's followers.
pub async fn list_followed_by(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Follow>> {
    let edges = follows::list_as_followed(&state.db, auth_user.user_id).await?;
    Ok(ApiResponse::success(edges))
}
