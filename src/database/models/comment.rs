use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::User;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: User,
}
