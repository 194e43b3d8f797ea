use axum::extract::State;

use crate::database::models::Destination;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::store::destinations;

/// GET /destinations - public destination catalogue.
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Destination>> {
    let all = destinations::list_all(&state.db).await?;
    Ok(ApiResponse::success(all))
}
