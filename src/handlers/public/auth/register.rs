use axum::{extract::State, Json};
use serde::Deserialize;
use std::collections::HashMap;

use super::validate;
use crate::auth::password;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::store::users::{self, NewUser};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_img: Option<String>,
}

/// POST /register - create a new account.
///
/// The raw password is hashed before anything touches the store and the
/// response serializes the user without its hash.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<User> {
    let mut field_errors = HashMap::new();

    let user_name = payload.user_name.unwrap_or_default();
    if let Err(problem) = validate::validate_user_name(&user_name) {
        field_errors.insert("userName".to_string(), problem);
    }
    let email = payload.email.unwrap_or_default();
    if let Err(problem) = validate::validate_email(&email) {
        field_errors.insert("email".to_string(), problem);
    }
    let raw_password = payload.password.unwrap_or_default();
    if let Err(problem) = validate::validate_password(&raw_password) {
        field_errors.insert("password".to_string(), problem);
    }
    if !field_errors.is_empty() {
        return Err(ApiError::field_errors("invalid registration", field_errors));
    }

    let password_hash = password::hash_password(&raw_password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })?;

    let user = users::insert(
        &state.db,
        NewUser {
            user_name,
            email,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
            bio: payload.bio,
            profile_img: payload.profile_img,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "registered new user");
    Ok(ApiResponse::created(user))
}
