use sqlx::PgExecutor;

use super::{write_violation, StoreError};
use crate::database::models::Follow;

pub async fn insert(
    ex: impl PgExecutor<'_>,
    followed_by_id: i64,
    following_id: i64,
) -> Result<Follow, StoreError> {
    sqlx::query_as::<_, Follow>(
        "INSERT INTO follows (followed_by_id, following_id)
         VALUES ($1, $2)
         RETURNING *",
    )
    .bind(followed_by_id)
    .bind(following_id)
    .fetch_one(ex)
    .await
    .map_err(write_violation)
}

/// Remove the edge `followed_by_id -> following_id`.
pub async fn delete_edge(
    ex: impl PgExecutor<'_>,
    followed_by_id: i64,
    following_id: i64,
) -> Result<(), StoreError> {
    let result =
        sqlx::query("DELETE FROM follows WHERE followed_by_id = $1 AND following_id = $2")
            .bind(followed_by_id)
            .bind(following_id)
            .execute(ex)
            .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("follow"));
    }
    Ok(())
}

/// Edges where the user appears on either side.
pub async fn list_either_side(
    ex: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Vec<Follow>, StoreError> {
    let follows = sqlx::query_as::<_, Follow>(
        "SELECT * FROM follows WHERE followed_by_id = $1 OR following_id = $1 ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(ex)
    .await?;
    Ok(follows)
}

/// Edges created by the user: the accounts it follows.
pub async fn list_as_follower(
    ex: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Vec<Follow>, StoreError> {
    let follows =
        sqlx::query_as::<_, Follow>("SELECT * FROM follows WHERE followed_by_id = $1 ORDER BY id")
            .bind(user_id)
            .fetch_all(ex)
            .await?;
    Ok(follows)
}

/// Edges pointing at the user: its followers.
pub async fn list_as_followed(
    ex: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Vec<Follow>, StoreError> {
    let follows =
        sqlx::query_as::<_, Follow>("SELECT * FROM follows WHERE following_id = $1 ORDER BY id")
            .bind(user_id)
            .fetch_all(ex)
            .await?;
    Ok(follows)
}
