mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn follow_edges_are_directed_and_unique() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let fan = common::register_user(&server.base_url, "fan").await?;
    let star = common::register_user(&server.base_url, "star").await?;
    let follow_url = format!("{}/account/users/{}/follows", server.base_url, star.id);

    let res = client.post(&follow_url).bearer_auth(&fan.token).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["followedById"].as_i64(), Some(fan.id));
    assert_eq!(body["data"]["followingId"].as_i64(), Some(star.id));

    // Duplicate edge is a conflict
    let res = client.post(&follow_url).bearer_auth(&fan.token).send().await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // The edge is directed: fan follows star, star has a follower
    let res = client
        .get(format!("{}/account/following", server.base_url))
        .bearer_auth(&fan.token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f["followingId"].as_i64() == Some(star.id)));

    let res = client
        .get(format!("{}/account/followedBy", server.base_url))
        .bearer_auth(&star.token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f["followedById"].as_i64() == Some(fan.id)));

    // ...and star follows nobody
    let res = client
        .get(format!("{}/account/following", server.base_url))
        .bearer_auth(&star.token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|f| f["followedById"].as_i64() != Some(star.id)));
    Ok(())
}

#[tokio::test]
async fn self_follow_is_rejected() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let user = common::register_user(&server.base_url, "narcissus").await?;

    let res = client
        .post(format!(
            "{}/account/users/{}/follows",
            server.base_url, user.id
        ))
        .bearer_auth(&user.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn following_a_missing_user_is_not_found() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let user = common::register_user(&server.base_url, "ghost-fan").await?;

    let res = client
        .post(format!(
            "{}/account/users/999999999/follows",
            server.base_url
        ))
        .bearer_auth(&user.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unfollow_removes_the_edge_once() -> Result<()> {
    let Some(server) = common::server().await? else {
        return Ok(());
    };
    let client = reqwest::Client::new();
    let fan = common::register_user(&server.base_url, "fickle-fan").await?;
    let star = common::register_user(&server.base_url, "fading-star").await?;
    let follow_url = format!("{}/account/users/{}/follows", server.base_url, star.id);

    let res = client.post(&follow_url).bearer_auth(&fan.token).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .delete(&follow_url)
        .bearer_auth(&fan.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Unfollowing again is 404, not a silent no-op
    let res = client
        .delete(&follow_url)
        .bearer_auth(&fan.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Both sides see an empty relationship
    let res = client
        .get(format!("{}/account/follows", server.base_url))
        .bearer_auth(&fan.token)
        .send()
        .await?;
    let body: Value = res.json().await?;
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|f| f["followingId"].as_i64() != Some(star.id)));
    Ok(())
}
