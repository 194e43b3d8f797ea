use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::policy;
use crate::database::models::Comment;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::store::{comments, posts, StoreError};

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub text: Option<String>,
}

impl CommentBody {
    fn text(self) -> Result<String, ApiError> {
        self.text
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::field_error("text", "text is required"))
    }
}

/// POST /account/posts/:id/comments - comment on any existing post.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<i64>,
    Json(payload): Json<CommentBody>,
) -> ApiResult<Comment> {
    posts::by_id(&state.db, post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;
    let text = payload.text()?;

    let comment = comments::insert(&state.db, post_id, auth_user.user_id, &text).await?;
    Ok(ApiResponse::created(comment))
}

/// GET /account/comments - the user's own comments.
pub async fn list_mine(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Comment>> {
    let mine = comments::list_by_user(&state.db, auth_user.user_id).await?;
    Ok(ApiResponse::success(mine))
}

/// Shared existence/ownership gate for comment mutation: post first, then the
/// comment (which must belong to that post), then the author check.
async fn load_owned_comment(
    tx: &mut sqlx::PgConnection,
    auth_user: &AuthUser,
    post_id: i64,
    comment_id: i64,
) -> Result<Comment, ApiError> {
    posts::by_id(&mut *tx, post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    let comment = comments::by_id_for_update(&mut *tx, comment_id)
        .await?
        .filter(|c| c.post_id == post_id)
        .ok_or_else(|| ApiError::not_found("comment not found"))?;

    policy::ensure_owner(auth_user.user_id, comment.user_id, "comment")?;
    Ok(comment)
}

/// PATCH /account/posts/:postId/comments/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    Json(payload): Json<CommentBody>,
) -> ApiResult<Comment> {
    let text = payload.text()?;

    let mut tx = state.db.begin().await.map_err(StoreError::from)?;
    load_owned_comment(&mut tx, &auth_user, post_id, comment_id).await?;
    let updated = comments::update_text(&mut *tx, comment_id, &text).await?;
    tx.commit().await.map_err(StoreError::from)?;

    Ok(ApiResponse::success(updated))
}

/// DELETE /account/posts/:postId/comments/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> ApiResult<Value> {
    let mut tx = state.db.begin().await.map_err(StoreError::from)?;
    load_owned_comment(&mut tx, &auth_user, post_id, comment_id).await?;
    comments::delete(&mut *tx, comment_id).await?;
    tx.commit().await.map_err(StoreError::from)?;

    Ok(ApiResponse::success(
        json!({ "message": "Comment deleted successfully" }),
    ))
}
