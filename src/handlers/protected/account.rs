use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use std::collections::HashMap;

use crate::database::models::{User, UserAccount};
use crate::error::ApiError;
use crate::handlers::public::auth::validate;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::store::users;

/// GET /account - the token payload for the authenticated user.
pub async fn get_account(Extension(auth_user): Extension<AuthUser>) -> ApiResult<AuthUser> {
    Ok(ApiResponse::success(auth_user))
}

/// GET /account/users - the full account aggregate (user, follows on both
/// sides, likes, posts, trips).
pub async fn get_account_users(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<UserAccount> {
    let account = users::account(&state.db, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;
    Ok(ApiResponse::success(account))
}

/// Explicit patch shape for PATCH /account. Omitted fields keep their prior
/// values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub profile_img: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.user_name.is_none()
            && self.email.is_none()
            && self.bio.is_none()
            && self.profile_img.is_none()
    }

    /// Merge into an existing row: only provided fields change.
    pub fn apply(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = self.last_name {
            user.last_name = Some(last_name);
        }
        if let Some(user_name) = self.user_name {
            user.user_name = user_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
        if let Some(profile_img) = self.profile_img {
            user.profile_img = Some(profile_img);
        }
    }

    fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if let Some(user_name) = &self.user_name {
            if let Err(problem) = validate::validate_user_name(user_name) {
                field_errors.insert("userName".to_string(), problem);
            }
        }
        if let Some(email) = &self.email {
            if let Err(problem) = validate::validate_email(email) {
                field_errors.insert("email".to_string(), problem);
            }
        }
        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::field_errors("invalid account update", field_errors))
        }
    }
}

/// PATCH /account - merge-patch the authenticated user.
pub async fn patch_account(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(patch): Json<UserPatch>,
) -> ApiResult<User> {
    if patch.is_empty() {
        return Err(ApiError::validation_error(
            "at least one field is required to update the account",
        ));
    }
    patch.validate()?;

    let mut tx = state.db.begin().await.map_err(crate::store::StoreError::from)?;

    let mut user = users::by_id_for_update(&mut *tx, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    patch.apply(&mut user);
    let updated = users::update(&mut *tx, &user).await?;

    tx.commit().await.map_err(crate::store::StoreError::from)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /account - remove the account; owned rows and follow edges go with
/// it via the schema cascades.
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<()> {
    users::delete(&state.db, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, "account deleted");
    Ok(ApiResponse::no_content())
}
