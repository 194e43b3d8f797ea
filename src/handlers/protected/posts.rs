use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::auth::policy;
use crate::database::models::{Post, PostDetail};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::store::{destinations, posts, StoreError};

/// GET /account/posts - the user's posts with destination, comments and
/// likes resolved.
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<PostDetail>> {
    let user_posts = posts::list_detailed_by_user(&state.db, auth_user.user_id).await?;
    Ok(ApiResponse::success(user_posts))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreate {
    pub text: Option<String>,
    pub post_img: Option<String>,
    pub destination_id: Option<i64>,
}

/// POST /account/posts
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<PostCreate>,
) -> ApiResult<Post> {
    let mut field_errors = HashMap::new();
    if payload.text.as_deref().unwrap_or_default().is_empty() {
        field_errors.insert("text".to_string(), "text is required".to_string());
    }
    if payload.destination_id.is_none() {
        field_errors.insert(
            "destinationId".to_string(),
            "destinationId is required".to_string(),
        );
    }
    if !field_errors.is_empty() {
        return Err(ApiError::field_errors("invalid post", field_errors));
    }

    let destination_id = payload.destination_id.unwrap();
    // Dangling reference fails before any row is written
    destinations::by_id(&state.db, destination_id)
        .await?
        .ok_or_else(|| ApiError::field_error("destinationId", "invalid destination"))?;

    let post = posts::insert(
        &state.db,
        posts::NewPost {
            text: payload.text.unwrap(),
            post_img: payload.post_img,
            destination_id,
            user_id: auth_user.user_id,
        },
    )
    .await?;

    Ok(ApiResponse::created(post))
}

/// Explicit patch shape for PATCH /account/posts/:id. Omitted fields keep
/// their prior values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub text: Option<String>,
    pub post_img: Option<String>,
    pub destination_id: Option<i64>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.post_img.is_none() && self.destination_id.is_none()
    }

    pub fn apply(self, post: &mut Post) {
        if let Some(text) = self.text {
            post.text = text;
        }
        if let Some(post_img) = self.post_img {
            post.post_img = Some(post_img);
        }
        if let Some(destination_id) = self.destination_id {
            post.destination_id = destination_id;
        }
    }
}

/// PATCH /account/posts/:id - merge-patch a post the user owns.
pub async fn update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(patch): Json<PostPatch>,
) -> ApiResult<Post> {
    if patch.is_empty() {
        return Err(ApiError::validation_error("at least one field is required"));
    }

    let mut tx = state.db.begin().await.map_err(StoreError::from)?;

    let mut post = posts::by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;
    policy::ensure_owner(auth_user.user_id, post.user_id, "post")?;

    if let Some(destination_id) = patch.destination_id {
        destinations::by_id(&mut *tx, destination_id)
            .await?
            .ok_or_else(|| ApiError::field_error("destinationId", "invalid destination"))?;
    }

    patch.apply(&mut post);
    let updated = posts::update(&mut *tx, &post).await?;

    tx.commit().await.map_err(StoreError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /account/posts/:id - comments and likes cascade with the post.
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    let mut tx = state.db.begin().await.map_err(StoreError::from)?;

    let post = posts::by_id_for_update(&mut *tx, id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;
    policy::ensure_owner(auth_user.user_id, post.user_id, "post")?;

    posts::delete(&mut *tx, id).await?;
    tx.commit().await.map_err(StoreError::from)?;

    Ok(ApiResponse::success(
        json!({ "message": "Post deleted successfully" }),
    ))
}
