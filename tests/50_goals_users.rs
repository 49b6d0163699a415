mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{register, send, test_app};

#[tokio::test]
async fn goal_completion_follows_amounts() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/goals",
        Some(&ada.token),
        Some(json!({
            "name": "Laptop",
            "targetAmount": 1200,
            "savedAmount": 600,
            "deadline": "2025-12-31",
            "isCompleted": true
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["msg"], "Goal created successfully");
    assert_eq!(body["data"]["isCompleted"], false);
    assert_eq!(body["data"]["deadline"], "2025-12-31T00:00:00Z");
    let id = body["data"]["_id"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/goals/{}", id),
        Some(&ada.token),
        Some(json!({ "savedAmount": 1250 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["isCompleted"], true);
    assert_eq!(body["data"]["name"], "Laptop");

    let (_, list) = send(&app, Method::GET, &format!("/goals/{}", ada.id), Some(&ada.token), None).await?;
    assert_eq!(list["data"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn goal_validation() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/goals",
        Some(&ada.token),
        Some(json!({ "name": "Trip", "targetAmount": 500, "deadline": "someday" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["msg"],
        "Goal validation failed: deadline: Cast to date failed for value \"someday\""
    );
    Ok(())
}

#[tokio::test]
async fn goal_delete_and_missing() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;
    let (_, created) = send(
        &app,
        Method::POST,
        "/goals",
        Some(&ada.token),
        Some(json!({ "name": "Trip", "targetAmount": 500, "deadline": "2026-06-01" })),
    )
    .await?;
    let id = created["data"]["_id"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(&app, Method::DELETE, &format!("/goals/{}", id), Some(&ada.token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Goal deleted successfully");

    let (status, body) = send(&app, Method::DELETE, &format!("/goals/{}", id), Some(&ada.token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Goal not found");
    Ok(())
}

#[tokio::test]
async fn profile_is_private_and_renamable() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;
    let bob = register(&app, "Bob", "bob@example.com").await?;

    let (status, body) = send(&app, Method::GET, &format!("/users/{}", ada.id), Some(&ada.token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(body["data"].get("password_hash").is_none());

    let (status, _) = send(&app, Method::GET, &format!("/users/{}", ada.id), Some(&bob.token), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::PUT, "/users", Some(&ada.token), Some(json!({ "name": "Ada L." }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ada L.");

    let (status, body) = send(&app, Method::PUT, "/users", Some(&ada.token), Some(json!({ "name": "  " }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "User validation failed: name: Name is required");
    Ok(())
}
