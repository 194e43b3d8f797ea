use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::{Follow, Like, Post, Trip};

/// A registered account. The password hash never serializes into API
/// responses.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_img: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Everything the account surface returns for `GET /account/users`: the user
/// plus its owned and related rows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(flatten)]
    pub user: User,
    /// Edges where this user is the follower.
    pub followed_by: Vec<Follow>,
    /// Edges where this user is the one being followed.
    pub following: Vec<Follow>,
    pub likes: Vec<Like>,
    pub posts: Vec<Post>,
    pub trips: Vec<Trip>,
}
