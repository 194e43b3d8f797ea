//! Typed persistence layer. One module per entity; every function takes an
//! executor so handlers can compose read-check-write sequences inside a
//! single transaction.

pub mod comments;
pub mod destinations;
pub mod follows;
pub mod likes;
pub mod posts;
pub mod trips;
pub mod users;

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors surfaced by the store. Constraint violations are translated into
/// typed variants here so handlers never inspect raw sqlx errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("duplicate value for {0}")]
    Duplicate(&'static str),

    #[error("referenced {0} does not exist")]
    MissingReference(&'static str),

    #[error("{0} is still referenced")]
    ReferenceInUse(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Map unique/foreign-key violations raised by an INSERT or UPDATE to their
/// typed variants, keyed by the constraint names in the migrations.
pub(crate) fn write_violation(err: sqlx::Error) -> StoreError {
    let mapped = match &err {
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or_default();
            match db_err.kind() {
                ErrorKind::UniqueViolation => match constraint {
                    "users_user_name_key" => Some(StoreError::Duplicate("userName")),
                    "users_email_key" => Some(StoreError::Duplicate("email")),
                    "follows_unique_edge" => Some(StoreError::Duplicate("follow")),
                    "likes_unique_user_post" => Some(StoreError::Duplicate("like")),
                    _ => None,
                },
                ErrorKind::ForeignKeyViolation => match constraint {
                    "trips_destination_id_fkey" | "posts_destination_id_fkey" => {
                        Some(StoreError::MissingReference("destinationId"))
                    }
                    "comments_post_id_fkey" | "likes_post_id_fkey" => {
                        Some(StoreError::MissingReference("postId"))
                    }
                    "follows_followed_by_id_fkey" | "follows_following_id_fkey" => {
                        Some(StoreError::MissingReference("userId"))
                    }
                    _ => None,
                },
                _ => None,
            }
        }
        _ => None,
    };
    mapped.unwrap_or(StoreError::Sqlx(err))
}
