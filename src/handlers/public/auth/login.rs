use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{generate_jwt, password, Claims};
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::store::users;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// User name or email.
    pub identity: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /login - authenticate and receive a session token.
///
/// Unknown identity and wrong password produce the same response, so the
/// endpoint does not reveal which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let identity = payload
        .identity
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::field_error("identity", "identity is required"))?;
    let raw_password = payload
        .password
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::field_error("password", "password is required"))?;

    let user = users::by_identity(&state.db, &identity)
        .await?
        .filter(|user| password::verify_password(&raw_password, &user.password_hash))
        .ok_or_else(|| ApiError::unauthorized("invalid credentials"))?;

    let security = &state.config.security;
    let claims = Claims::new(user.id, user.user_name.clone(), security.jwt_expiry_hours);
    let token = generate_jwt(&claims, security).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })?;

    tracing::info!(user_id = user.id, "user logged in");
    Ok(ApiResponse::success(LoginResponse { token, user }))
}
