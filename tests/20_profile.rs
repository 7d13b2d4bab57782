mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn profile_requires_bearer_token() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.client.get(server.url("/api/users/profile")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .client
        .get(server.url("/api/users/profile"))
        .bearer_auth("not-a-jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn missing_profile_is_not_found() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .client
        .get(server.url("/api/users/profile"))
        .bearer_auth(server.token("u1"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn profile_updates_merge() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.token("u1");

    let res = server
        .client
        .post(server.url("/api/users/profile"))
        .bearer_auth(&token)
        .json(&json!({"name": "Ana"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .client
        .put(server.url("/api/users/profile"))
        .bearer_auth(&token)
        .json(&json!({"phone": "555", "uid": "someone-else"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let profile: Value = server
        .client
        .get(server.url("/api/users/profile"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(profile["name"], "Ana");
    assert_eq!(profile["phone"], "555");
    assert_eq!(profile["uid"], "u1");
    assert_eq!(profile["email"], "u1@example.com");
    assert!(profile["updatedAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn member_cannot_grant_self_admin() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.token("u1");

    let res = server
        .client
        .post(server.url("/api/users/profile"))
        .bearer_auth(&token)
        .json(&json!({"name": "Ana", "isAdmin": true}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .client
        .post(server.url("/api/notices"))
        .bearer_auth(&token)
        .json(&json!({"title": "Closed"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let profile: Value = server
        .client
        .get(server.url("/api/users/profile"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert!(profile.get("isAdmin").is_none());
    Ok(())
}

#[tokio::test]
async fn nested_profile_fields_merge() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.token("u1");

    for body in [json!({"address": {"city": "Colombo"}}), json!({"address": {"zip": "00100"}})] {
        let res = server
            .client
            .put(server.url("/api/users/profile"))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let profile: Value = server
        .client
        .get(server.url("/api/users/profile"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(profile["address"]["city"], "Colombo");
    assert_eq!(profile["address"]["zip"], "00100");
    Ok(())
}
