use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::{CommentWithAuthor, Destination, Like};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub text: String,
    pub post_img: Option<String>,
    pub destination_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Post with destination, comments (incl. authors) and likes resolved, as
/// the post list returns it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub destination: Destination,
    pub comments: Vec<CommentWithAuthor>,
    pub likes: Vec<Like>,
}
