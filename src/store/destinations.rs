use sqlx::error::ErrorKind;
use sqlx::PgExecutor;

use super::StoreError;
use crate::database::models::Destination;

pub async fn insert(
    ex: impl PgExecutor<'_>,
    destination_name: &str,
) -> Result<Destination, StoreError> {
    let destination = sqlx::query_as::<_, Destination>(
        "INSERT INTO destinations (destination_name) VALUES ($1) RETURNING *",
    )
    .bind(destination_name)
    .fetch_one(ex)
    .await?;
    Ok(destination)
}

pub async fn by_id(ex: impl PgExecutor<'_>, id: i64) -> Result<Option<Destination>, StoreError> {
    let destination = sqlx::query_as::<_, Destination>("SELECT * FROM destinations WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(destination)
}

pub async fn list_all(ex: impl PgExecutor<'_>) -> Result<Vec<Destination>, StoreError> {
    let destinations =
        sqlx::query_as::<_, Destination>("SELECT * FROM destinations ORDER BY destination_name")
            .fetch_all(ex)
            .await?;
    Ok(destinations)
}

pub async fn update_name(
    ex: impl PgExecutor<'_>,
    id: i64,
    destination_name: &str,
) -> Result<Destination, StoreError> {
    sqlx::query_as::<_, Destination>(
        "UPDATE destinations SET destination_name = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(destination_name)
    .fetch_optional(ex)
    .await?
    .ok_or(StoreError::NotFound("destination"))
}

/// Deletion is refused while trips or posts still reference the row; the
/// schema RESTRICTs and the violation maps to [`StoreError::ReferenceInUse`].
pub async fn delete(ex: impl PgExecutor<'_>, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM destinations WHERE id = $1")
        .bind(id)
        .execute(ex)
        .await
        .map_err(|err| {
            let referenced = matches!(
                &err,
                sqlx::Error::Database(db_err) if db_err.kind() == ErrorKind::ForeignKeyViolation
            );
            if referenced {
                StoreError::ReferenceInUse("destination")
            } else {
                StoreError::Sqlx(err)
            }
        })?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("destination"));
    }
    Ok(())
}
