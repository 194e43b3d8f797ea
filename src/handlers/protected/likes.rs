use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::policy;
use crate::database::models::Like;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::store::{likes, posts, StoreError};

#[derive(Debug, Serialize)]
pub struct LikeToggle {
    pub action: &'static str,
    pub message: &'static str,
}

/// POST /account/posts/:id/likes - flip the like state for (user, post).
///
/// Runs in one transaction against the UNIQUE (post_id, user_id) constraint,
/// so concurrent duplicate requests can never leave two rows behind. A
/// request that loses the insert race observes the pair already liked and
/// reports "like".
pub async fn toggle(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<i64>,
) -> ApiResult<LikeToggle> {
    let mut tx = state.db.begin().await.map_err(StoreError::from)?;

    posts::by_id(&mut *tx, post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    let removed = likes::delete_by_user_post(&mut *tx, post_id, auth_user.user_id).await?;
    if removed {
        tx.commit().await.map_err(StoreError::from)?;
        return Ok(ApiResponse::success(LikeToggle {
            action: "unlike",
            message: "Post unliked successfully",
        }));
    }

    let inserted = likes::insert_unless_present(&mut *tx, post_id, auth_user.user_id).await?;
    tx.commit().await.map_err(StoreError::from)?;

    let status = if inserted.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok(ApiResponse::with_status(
        LikeToggle {
            action: "like",
            message: "Post liked successfully",
        },
        status,
    ))
}

/// GET /account/likes - the user's own likes.
pub async fn list_mine(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Like>> {
    let mine = likes::list_by_user(&state.db, auth_user.user_id).await?;
    Ok(ApiResponse::success(mine))
}

/// DELETE /account/posts/:postId/likes/:id - explicit removal by id.
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((post_id, like_id)): Path<(i64, i64)>,
) -> ApiResult<Value> {
    let mut tx = state.db.begin().await.map_err(StoreError::from)?;

    posts::by_id(&mut *tx, post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    let like = likes::by_id_for_update(&mut *tx, like_id)
        .await?
        .filter(|l| l.post_id == post_id)
        .ok_or_else(|| ApiError::not_found("like not found"))?;
    policy::ensure_owner(auth_user.user_id, like.user_id, "like")?;

    likes::delete(&mut *tx, like_id).await?;
    tx.commit().await.map_err(StoreError::from)?;

    Ok(ApiResponse::success(
        json!({ "message": "Like deleted successfully" }),
    ))
}
