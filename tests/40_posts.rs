mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn create_post(
    base_url: &str,
    token: &str,
    destination_id: i64,
    text: &str,
) -> Result<i64> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/account/posts", base_url))
        .bearer_auth(token)
        .json(&json!({ "text": text, "destinationId": destination_id }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "create post failed: {}",
        res.text().await?
    );
    let body: Value = res.json().await?;
    Ok(body["data"]["id"].as_i64().unwrap())
}

#[tokio::test]
async fn post_patch_merges_partial_fields() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let user = common::register_user(&server.base_url, "poster").await?;
    let taipei = common::create_destination(&server.base_url, &user.token, "Taipei").await?;
    let post_id = create_post(&server.base_url, &user.token, taipei, "night market").await?;

    let res = client
        .patch(format!("{}/account/posts/{}", server.base_url, post_id))
        .bearer_auth(&user.token)
        .json(&json!({ "postImg": "https://img.test.example/market.jpg" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["data"]["postImg"], "https://img.test.example/market.jpg");
    assert_eq!(body["data"]["text"], "night market");
    assert_eq!(body["data"]["destinationId"].as_i64(), Some(taipei));

    // An empty patch is a validation error
    let res = client
        .patch(format!("{}/account/posts/{}", server.base_url, post_id))
        .bearer_auth(&user.token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn like_toggle_alternates_deterministically() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let user = common::register_user(&server.base_url, "liker").await?;
    let bali = common::create_destination(&server.base_url, &user.token, "Bali").await?;
    let post_id = create_post(&server.base_url, &user.token, bali, "surf").await?;
    let likes_url = format!("{}/account/posts/{}/likes", server.base_url, post_id);

    // 1: like
    let res = client.post(&likes_url).bearer_auth(&user.token).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["action"], "like");

    // 2: unlike
    let res = client.post(&likes_url).bearer_auth(&user.token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["action"], "unlike");

    // No like row remains for the pair
    let res = client
        .get(format!("{}/account/likes", server.base_url))
        .bearer_auth(&user.token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|l| l["postId"].as_i64() != Some(post_id)));

    // 3: like again
    let res = client.post(&likes_url).bearer_auth(&user.token).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["action"], "like");
    Ok(())
}

#[tokio::test]
async fn comments_require_ownership_to_mutate() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let author = common::register_user(&server.base_url, "commenter").await?;
    let intruder = common::register_user(&server.base_url, "comment-intruder").await?;
    let cusco = common::create_destination(&server.base_url, &author.token, "Cusco").await?;
    let post_id = create_post(&server.base_url, &author.token, cusco, "ruins").await?;

    let res = client
        .post(format!(
            "{}/account/posts/{}/comments",
            server.base_url, post_id
        ))
        .bearer_auth(&author.token)
        .json(&json!({ "text": "wish I stayed longer" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    let comment_id = body["data"]["id"].as_i64().unwrap();

    // Another user cannot edit or delete it
    let comment_url = format!(
        "{}/account/posts/{}/comments/{}",
        server.base_url, post_id, comment_id
    );
    let res = client
        .patch(&comment_url)
        .bearer_auth(&intruder.token)
        .json(&json!({ "text": "defaced" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(&comment_url)
        .bearer_auth(&intruder.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The author can
    let res = client
        .patch(&comment_url)
        .bearer_auth(&author.token)
        .json(&json!({ "text": "wish I stayed two weeks" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["text"], "wish I stayed two weeks");
    Ok(())
}

#[tokio::test]
async fn deleting_a_post_cascades_to_comments_and_likes() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let user = common::register_user(&server.base_url, "cascader").await?;
    let porto = common::create_destination(&server.base_url, &user.token, "Porto").await?;
    let post_id = create_post(&server.base_url, &user.token, porto, "tiles everywhere").await?;

    // Attach a comment and a like
    let res = client
        .post(format!(
            "{}/account/posts/{}/comments",
            server.base_url, post_id
        ))
        .bearer_auth(&user.token)
        .json(&json!({ "text": "azulejos" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let res = client
        .post(format!("{}/account/posts/{}/likes", server.base_url, post_id))
        .bearer_auth(&user.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Delete the post
    let res = client
        .delete(format!("{}/account/posts/{}", server.base_url, post_id))
        .bearer_auth(&user.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // No orphaned comments or likes remain
    let res = client
        .get(format!("{}/account/comments", server.base_url))
        .bearer_auth(&user.token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["postId"].as_i64() != Some(post_id)));

    let res = client
        .get(format!("{}/account/likes", server.base_url))
        .bearer_auth(&user.token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|l| l["postId"].as_i64() != Some(post_id)));

    // Commenting on the deleted post is 404
    let res = client
        .post(format!(
            "{}/account/posts/{}/comments",
            server.base_url, post_id
        ))
        .bearer_auth(&user.token)
        .json(&json!({ "text": "too late" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn destination_delete_is_blocked_while_referenced() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let user = common::register_user(&server.base_url, "dest-admin").await?;
    let hanoi = common::create_destination(&server.base_url, &user.token, "Hanoi").await?;
    let post_id = create_post(&server.base_url, &user.token, hanoi, "pho").await?;

    let res = client
        .delete(format!(
            "{}/account/destinations/{}",
            server.base_url, hanoi
        ))
        .bearer_auth(&user.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Once the post is gone the destination can be removed
    let res = client
        .delete(format!("{}/account/posts/{}", server.base_url, post_id))
        .bearer_auth(&user.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!(
            "{}/account/destinations/{}",
            server.base_url, hanoi
        ))
        .bearer_auth(&user.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    Ok(())
}
