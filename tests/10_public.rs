mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn health_reports_connected_store() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server.client.get(server.url("/api/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["firebase"], "connected");
    assert!(body["timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let server = TestServer::start().await?;

    let body: Value = server.client.get(server.url("/")).send().await?.json().await?;
    assert_eq!(body["name"], "MFitness API");
    assert!(body["endpoints"]["public"].as_array().is_some_and(|a| !a.is_empty()));
    Ok(())
}

#[tokio::test]
async fn sessions_catalog() -> Result<()> {
    let server = TestServer::start().await?;

    let body: Value = server.client.get(server.url("/api/sessions")).send().await?.json().await?;
    assert_eq!(body["sessionTypes"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["timeSlots"][0], "06:00 AM");
    assert_eq!(body["timeSlots"][15], "09:00 PM");
    assert_eq!(body["slotCapacity"], 20);
    Ok(())
}

#[tokio::test]
async fn contact_is_stored_unread() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/api/contact"))
        .json(&json!({"name": "Ana", "message": "Hi", "status": "read"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], true);

    server.make_admin("boss").await?;
    let contacts: Vec<Value> = server
        .client
        .get(server.url("/api/admin/contacts"))
        .bearer_auth(server.token("boss"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["status"], "unread");
    assert_eq!(contacts[0]["name"], "Ana");
    assert!(contacts[0]["createdAt"].is_string());
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/api/contact"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["error"].is_string());

    let res = server.client.post(server.url("/api/contact")).json(&json!([1, 2])).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
