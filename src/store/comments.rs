use sqlx::PgExecutor;

use super::{write_violation, StoreError};
use crate::database::models::Comment;

pub async fn insert(
    ex: impl PgExecutor<'_>,
    post_id: i64,
    user_id: i64,
    text: &str,
) -> Result<Comment, StoreError> {
    sqlx::query_as::<_, Comment>(
        "INSERT INTO comments (text, post_id, user_id) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(text)
    .bind(post_id)
    .bind(user_id)
    .fetch_one(ex)
    .await
    .map_err(write_violation)
}

/// Row-locked read for update and delete flows.
pub async fn by_id_for_update(
    ex: impl PgExecutor<'_>,
    id: i64,
) -> Result<Option<Comment>, StoreError> {
    let comment = sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(comment)
}

pub async fn update_text(
    ex: impl PgExecutor<'_>,
    id: i64,
    text: &str,
) -> Result<Comment, StoreError> {
    sqlx::query_as::<_, Comment>("UPDATE comments SET text = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(text)
        .fetch_optional(ex)
        .await?
        .ok_or(StoreError::NotFound("comment"))
}

pub async fn delete(ex: impl PgExecutor<'_>, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(ex)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("comment"));
    }
    Ok(())
}

pub async fn list_by_user(
    ex: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Vec<Comment>, StoreError> {
    let comments =
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE user_id = $1 ORDER BY id")
            .bind(user_id)
            .fetch_all(ex)
            .await?;
    Ok(comments)
}
