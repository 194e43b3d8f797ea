use sqlx::PgExecutor;

use super::{write_violation, StoreError};
use crate::database::models::Like;

/// Remove the like for (post, user) if present. Returns whether a row was
/// deleted; the toggle uses this to tell the two states apart.
pub async fn delete_by_user_post(
    ex: impl PgExecutor<'_>,
    post_id: i64,
    user_id: i64,
) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(ex)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Insert a like unless one already exists. The UNIQUE (post_id, user_id)
/// constraint makes this safe against concurrent duplicates; a lost race
/// returns `None` and the pair is already in the liked state.
pub async fn insert_unless_present(
    ex: impl PgExecutor<'_>,
    post_id: i64,
    user_id: i64,
) -> Result<Option<Like>, StoreError> {
    let like = sqlx::query_as::<_, Like>(
        "INSERT INTO likes (post_id, user_id)
         VALUES ($1, $2)
         ON CONFLICT (post_id, user_id) DO NOTHING
         RETURNING *",
    )
    .bind(post_id)
    .bind(user_id)
    .fetch_optional(ex)
    .await
    .map_err(write_violation)?;
    Ok(like)
}

/// Row-locked read for the explicit delete-by-id route.
pub async fn by_id_for_update(
    ex: impl PgExecutor<'_>,
    id: i64,
) -> Result<Option<Like>, StoreError> {
    let like = sqlx::query_as::<_, Like>("SELECT * FROM likes WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(like)
}

pub async fn delete(ex: impl PgExecutor<'_>, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM likes WHERE id = $1")
        .bind(id)
        .execute(ex)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("like"));
    }
    Ok(())
}

pub async fn list_by_user(ex: impl PgExecutor<'_>, user_id: i64) -> Result<Vec<Like>, StoreError> {
    let likes = sqlx::query_as::<_, Like>("SELECT * FROM likes WHERE user_id = $1 ORDER BY id")
        .bind(user_id)
        .fetch_all(ex)
        .await?;
    Ok(likes)
}
