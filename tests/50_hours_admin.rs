mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;
use mfitness_api::models::collections;

#[tokio::test]
async fn default_hours_when_unset() -> Result<()> {
    let server = TestServer::start().await?;

    let hours: Value = server.client.get(server.url("/api/hours")).send().await?.json().await?;
    for day in ["monday", "tuesday", "wednesday", "thursday", "friday"] {
        assert_eq!(hours[day], json!({"open": "06:00", "close": "22:00", "closed": false}));
    }
    assert_eq!(hours["saturday"], json!({"open": "08:00", "close": "20:00", "closed": false}));
    assert_eq!(hours["sunday"], json!({"open": "08:00", "close": "18:00", "closed": false}));
    Ok(())
}

#[tokio::test]
async fn admin_replaces_hours() -> Result<()> {
    let server = TestServer::start().await?;
    server.make_admin("boss").await?;

    let res = server
        .client
        .put(server.url("/api/hours"))
        .bearer_auth(server.token("boss"))
        .json(&json!({"sunday": {"open": "10:00", "close": "14:00", "closed": true}}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let hours: Value = server.client.get(server.url("/api/hours")).send().await?.json().await?;
    assert_eq!(hours["sunday"]["closed"], true);
    assert_eq!(hours["updatedBy"], "boss");
    assert!(hours["updatedAt"].is_string());
    assert!(hours.get("monday").is_none());
    Ok(())
}

#[tokio::test]
async fn invalid_hours_are_rejected_with_field_errors() -> Result<()> {
    let server = TestServer::start().await?;
    server.make_admin("boss").await?;

    let res = server
        .client
        .put(server.url("/api/hours"))
        .bearer_auth(server.token("boss"))
        .json(&json!({"monday": {"open": "6am", "close": "22:00", "closed": false}}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["fieldErrors"]["monday.open"].is_string());

    let hours: Value = server.client.get(server.url("/api/hours")).send().await?.json().await?;
    assert_eq!(hours["monday"]["open"], "06:00");
    Ok(())
}

#[tokio::test]
async fn hours_update_requires_admin() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .client
        .put(server.url("/api/hours"))
        .bearer_auth(server.token("member"))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admin_lists_are_newest_first() -> Result<()> {
    let server = TestServer::start().await?;
    server.make_admin("boss").await?;

    server
        .seed(collections::BOOKINGS, json!({"userId": "a", "createdAt": "2026-01-01T00:00:00.000000Z"}))
        .await?;
    server
        .seed(collections::BOOKINGS, json!({"userId": "b", "createdAt": "2026-02-01T00:00:00.000000Z"}))
        .await?;

    let bookings: Vec<Value> = server
        .client
        .get(server.url("/api/admin/bookings"))
        .bearer_auth(server.token("boss"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0]["userId"], "b");
    assert_eq!(bookings[1]["userId"], "a");

    for path in ["/api/admin/bookings", "/api/admin/comments", "/api/admin/contacts"] {
        let res = server
            .client
            .get(server.url(path))
            .bearer_auth(server.token("member"))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{}", path);

        let res = server.client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{}", path);
    }
    Ok(())
}
