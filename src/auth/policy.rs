//! Ownership predicates. Handlers check existence first (404), then call
//! these (403); the two must never be conflated.

use crate::error::ApiError;

/// Allow only the resource owner to act.
pub fn ensure_owner(acting_user_id: i64, owner_id: i64, resource: &str) -> Result<(), ApiError> {
    if acting_user_id == owner_id {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!(
            "not allowed to modify this {}",
            resource
        )))
    }
}
