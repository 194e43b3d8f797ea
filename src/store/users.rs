use sqlx::{PgExecutor, PgPool};

use super::{write_violation, StoreError};
use crate::database::models::{User, UserAccount};

pub struct NewUser {
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_img: Option<String>,
}

pub async fn insert(ex: impl PgExecutor<'_>, new_user: NewUser) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (user_name, email, password_hash, first_name, last_name, bio, profile_img)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(&new_user.user_name)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(&new_user.bio)
    .bind(&new_user.profile_img)
    .fetch_one(ex)
    .await
    .map_err(write_violation)
}

pub async fn by_id(ex: impl PgExecutor<'_>, id: i64) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(user)
}

/// Row-locked read for update flows.
pub async fn by_id_for_update(
    ex: impl PgExecutor<'_>,
    id: i64,
) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(user)
}

/// Look up by user name or email; login accepts either as identity.
pub async fn by_identity(
    ex: impl PgExecutor<'_>,
    identity: &str,
) -> Result<Option<User>, StoreError> {
    let user =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_name = $1 OR email = $1")
            .bind(identity)
            .fetch_optional(ex)
            .await?;
    Ok(user)
}

/// Write back a full row; partial-update merging happens in the handler on a
/// row loaded with [`by_id_for_update`].
pub async fn update(ex: impl PgExecutor<'_>, user: &User) -> Result<User, StoreError> {
    sqlx::query_as::<_, User>(
        "UPDATE users
         SET user_name = $2, email = $3, first_name = $4, last_name = $5, bio = $6, profile_img = $7
         WHERE id = $1
         RETURNING *",
    )
    .bind(user.id)
    .bind(&user.user_name)
    .bind(&user.email)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.bio)
    .bind(&user.profile_img)
    .fetch_one(ex)
    .await
    .map_err(write_violation)
}

pub async fn delete(ex: impl PgExecutor<'_>, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(ex)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("user"));
    }
    Ok(())
}

/// The full account aggregate: the user plus follows on both sides, likes,
/// posts and trips.
pub async fn account(pool: &PgPool, id: i64) -> Result<Option<UserAccount>, StoreError> {
    let Some(user) = by_id(pool, id).await? else {
        return Ok(None);
    };

    let followed_by = super::follows::list_as_follower(pool, id).await?;
    let following = super::follows::list_as_followed(pool, id).await?;
    let likes = super::likes::list_by_user(pool, id).await?;
    let posts = super::posts::list_by_user(pool, id).await?;
    let trips = super::trips::list_rows_by_user(pool, id).await?;

    Ok(Some(UserAccount {
        user,
        followed_by,
        following,
        likes,
        posts,
        trips,
    }))
}
