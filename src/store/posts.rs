use sqlx::{PgExecutor, PgPool};
use std::collections::HashMap;

use super::{write_violation, StoreError};
use crate::database::models::{
    Comment, CommentWithAuthor, Destination, Like, Post, PostDetail, User,
};

pub struct NewPost {
    pub text: String,
    pub post_img: Option<String>,
    pub destination_id: i64,
    pub user_id: i64,
}

pub async fn insert(ex: impl PgExecutor<'_>, new_post: NewPost) -> Result<Post, StoreError> {
    sqlx::query_as::<_, Post>(
        "INSERT INTO posts (text, post_img, destination_id, user_id)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(&new_post.text)
    .bind(&new_post.post_img)
    .bind(new_post.destination_id)
    .bind(new_post.user_id)
    .fetch_one(ex)
    .await
    .map_err(write_violation)
}

pub async fn by_id(ex: impl PgExecutor<'_>, id: i64) -> Result<Option<Post>, StoreError> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(post)
}

/// Row-locked read for update and delete flows.
pub async fn by_id_for_update(
    ex: impl PgExecutor<'_>,
    id: i64,
) -> Result<Option<Post>, StoreError> {
    let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(post)
}

/// Write back a full row; partial-update merging happens in the handler.
pub async fn update(ex: impl PgExecutor<'_>, post: &Post) -> Result<Post, StoreError> {
    sqlx::query_as::<_, Post>(
        "UPDATE posts
         SET text = $2, post_img = $3, destination_id = $4
         WHERE id = $1
         RETURNING *",
    )
    .bind(post.id)
    .bind(&post.text)
    .bind(&post.post_img)
    .bind(post.destination_id)
    .fetch_one(ex)
    .await
    .map_err(write_violation)
}

/// Comments and likes go with the post via the schema's cascade.
pub async fn delete(ex: impl PgExecutor<'_>, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(ex)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound("post"));
    }
    Ok(())
}

/// Bare post rows owned by a user.
pub async fn list_by_user(ex: impl PgExecutor<'_>, user_id: i64) -> Result<Vec<Post>, StoreError> {
    let posts = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE user_id = $1 ORDER BY id")
        .bind(user_id)
        .fetch_all(ex)
        .await?;
    Ok(posts)
}

/// Posts owned by a user with destination, comments (incl. authors) and
/// likes resolved.
pub async fn list_detailed_by_user(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<PostDetail>, StoreError> {
    let posts = list_by_user(pool, user_id).await?;
    resolve_details(pool, posts).await
}

/// Posts attached to a destination, fully resolved.
pub async fn list_by_destination(
    pool: &PgPool,
    destination_id: i64,
) -> Result<Vec<PostDetail>, StoreError> {
    let posts =
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE destination_id = $1 ORDER BY id")
            .bind(destination_id)
            .fetch_all(pool)
            .await?;
    resolve_details(pool, posts).await
}

async fn resolve_details(pool: &PgPool, posts: Vec<Post>) -> Result<Vec<PostDetail>, StoreError> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    let destination_ids: Vec<i64> = posts.iter().map(|p| p.destination_id).collect();

    let destinations =
        sqlx::query_as::<_, Destination>("SELECT * FROM destinations WHERE id = ANY($1)")
            .bind(&destination_ids)
            .fetch_all(pool)
            .await?;
    let destinations_by_id: HashMap<i64, Destination> =
        destinations.into_iter().map(|d| (d.id, d)).collect();

    let comments =
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE post_id = ANY($1) ORDER BY id")
            .bind(&post_ids)
            .fetch_all(pool)
            .await?;

    let author_ids: Vec<i64> = comments.iter().map(|c| c.user_id).collect();
    let authors = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
        .bind(&author_ids)
        .fetch_all(pool)
        .await?;
    let authors_by_id: HashMap<i64, User> = authors.into_iter().map(|u| (u.id, u)).collect();

    let mut comments_by_post: HashMap<i64, Vec<CommentWithAuthor>> = HashMap::new();
    for comment in comments {
        let user = authors_by_id
            .get(&comment.user_id)
            .cloned()
            .ok_or(StoreError::NotFound("user"))?;
        comments_by_post
            .entry(comment.post_id)
            .or_default()
            .push(CommentWithAuthor { comment, user });
    }

    let likes =
        sqlx::query_as::<_, Like>("SELECT * FROM likes WHERE post_id = ANY($1) ORDER BY id")
            .bind(&post_ids)
            .fetch_all(pool)
            .await?;
    let mut likes_by_post: HashMap<i64, Vec<Like>> = HashMap::new();
    for like in likes {
        likes_by_post.entry(like.post_id).or_default().push(like);
    }

    let mut detailed = Vec::with_capacity(posts.len());
    for post in posts {
        let destination = destinations_by_id
            .get(&post.destination_id)
            .cloned()
            .ok_or(StoreError::NotFound("destination"))?;
        let comments = comments_by_post.remove(&post.id).unwrap_or_default();
        let likes = likes_by_post.remove(&post.id).unwrap_or_default();
        detailed.push(PostDetail {
            post,
            destination,
            comments,
            likes,
        });
    }
    Ok(detailed)
}
