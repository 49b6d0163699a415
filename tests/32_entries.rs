mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use common::{register, send, test_app, TestUser};

async fn create(
    app: &axum::Router,
    user: &TestUser,
    resource: &str,
    body: Value,
) -> Result<(StatusCode, Value)> {
    send(app, Method::POST, &format!("/{}", resource), Some(&user.token), Some(body)).await
}

fn amount(value: &Value) -> Result<Decimal> {
    Ok(serde_json::from_value(value.clone())?)
}

async fn listed_and_total(app: &axum::Router, user: &TestUser, resource: &str) -> Result<(Decimal, Decimal)> {
    let (_, list) = send(app, Method::GET, &format!("/{}/{}", resource, user.id), Some(&user.token), None).await?;
    let mut listed = Decimal::ZERO;
    for entry in list["data"].as_array().cloned().unwrap_or_default() {
        listed += amount(&entry["amount"])?;
    }

    let (_, total) = send(
        app,
        Method::GET,
        &format!("/{}/total/{}", resource, user.id),
        Some(&user.token),
        None,
    )
    .await?;
    let key = if resource == "incomes" { "totalIncome" } else { "totalExpense" };
    Ok((listed, amount(&total["data"][key])?))
}

#[tokio::test]
async fn income_create_then_get() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;

    let (status, body) = create(
        &app,
        &ada,
        "incomes",
        json!({ "user_id": ada.id, "name": "Salary", "category": "salary", "amount": 5000 }),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["msg"], "Income created successfully");
    let id = body["data"]["_id"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/incomes/single/{}", id),
        Some(&ada.token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Salary");
    assert_eq!(body["data"]["category"], "salary");
    assert_eq!(body["data"]["amount"], 5000.0);
    assert_eq!(body["data"]["user_id"], ada.id.as_str());
    assert!(body["data"]["created_at"].is_string());
    Ok(())
}

#[tokio::test]
async fn totals_match_listed_amounts() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/expenses/total/{}", ada.id),
        Some(&ada.token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalExpense"], 0.0);

    for (name, category, amount) in [("Rent", "bills", 1500.0), ("Coffee", "food", 3.25), ("Gift", "other", 0.0)] {
        let (status, _) = create(
            &app,
            &ada,
            "expenses",
            json!({ "name": name, "category": category, "amount": amount }),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (listed, total) = listed_and_total(&app, &ada, "expenses").await?;
    assert_eq!(total, listed);
    assert_eq!(listed, Decimal::new(150325, 2));
    Ok(())
}

#[tokio::test]
async fn fractional_totals_are_exact() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;

    for (name, amount) in [("Cashback", 0.1), ("Refund", 0.2), ("Interest", 0.3)] {
        let (status, _) = create(
            &app,
            &ada,
            "incomes",
            json!({ "name": name, "category": "other", "amount": amount }),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (listed, total) = listed_and_total(&app, &ada, "incomes").await?;
    assert_eq!(total, listed);
    assert_eq!(total, "0.6".parse::<Decimal>()?);

    let (_, body) = send(&app, Method::GET, &format!("/incomes/total/{}", ada.id), Some(&ada.token), None).await?;
    assert_eq!(body["data"]["totalIncome"], 0.6);
    Ok(())
}

#[tokio::test]
async fn text_fields_are_stored_as_submitted() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;

    let (status, created) = create(
        &app,
        &ada,
        "expenses",
        json!({ "name": " Rent ", "category": "bills", "amount": 1500 }),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["name"], " Rent ");
    let id = created["data"]["_id"].as_str().unwrap_or_default().to_string();

    let (_, body) = send(&app, Method::GET, &format!("/expenses/single/{}", id), Some(&ada.token), None).await?;
    assert_eq!(body["data"]["name"], " Rent ");

    let (status, body) = create(
        &app,
        &ada,
        "expenses",
        json!({ "name": "Rent", "category": " bills", "amount": 1500 }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["msg"],
        "Expense validation failed: category: ` bills` is not a valid enum value for path `category`."
    );
    Ok(())
}

#[tokio::test]
async fn list_is_newest_first() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;

    for name in ["first", "second", "third"] {
        create(&app, &ada, "incomes", json!({ "name": name, "category": "other", "amount": 1 })).await?;
    }

    let (_, body) = send(&app, Method::GET, &format!("/incomes/{}", ada.id), Some(&ada.token), None).await?;
    let names: Vec<&str> = body["data"]
        .as_array()
        .map(|a| a.iter().filter_map(|e| e["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["third", "second", "first"]);
    Ok(())
}

#[tokio::test]
async fn validation_errors_name_every_field() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;

    let (status, body) = create(&app, &ada, "incomes", json!({ "category": "lottery", "amount": -5 })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let msg = body["msg"].as_str().unwrap_or_default();
    assert!(msg.starts_with("Income validation failed: "), "{}", msg);
    assert!(msg.contains("name: Income name is required"));
    assert!(msg.contains("category: `lottery` is not a valid enum value for path `category`."));
    assert!(msg.contains("amount: Amount must be positive"));

    let (status, body) = create(&app, &ada, "expenses", json!({ "name": "Rent", "category": "bills" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Expense validation failed: amount: Amount is required");
    Ok(())
}

#[tokio::test]
async fn update_keeps_unspecified_fields() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;
    let (_, created) = create(
        &app,
        &ada,
        "expenses",
        json!({ "name": "Rent", "category": "bills", "amount": 1500 }),
    )
    .await?;
    let id = created["data"]["_id"].as_str().unwrap_or_default().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/expenses/{}", id),
        Some(&ada.token),
        Some(json!({ "amount": 1600 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Expense updated successfully");
    assert_eq!(body["data"]["amount"], 1600.0);
    assert_eq!(body["data"]["name"], "Rent");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/expenses/{}", id),
        Some(&ada.token),
        Some(json!({ "amount": -1 })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn delete_returns_record_and_unknown_id_is_not_found() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;
    let (_, created) = create(&app, &ada, "incomes", json!({ "name": "Bonus", "category": "other", "amount": 100 })).await?;
    let id = created["data"]["_id"].as_str().unwrap_or_default().to_string();

    let missing = uuid::Uuid::new_v4();
    let (status, body) = send(&app, Method::DELETE, &format!("/incomes/{}", missing), Some(&ada.token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Income not found");

    let (_, list) = send(&app, Method::GET, &format!("/incomes/{}", ada.id), Some(&ada.token), None).await?;
    assert_eq!(list["data"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, Method::DELETE, &format!("/incomes/{}", id), Some(&ada.token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Income deleted successfully");
    assert_eq!(body["data"]["name"], "Bonus");

    let (status, _) = send(&app, Method::GET, &format!("/incomes/single/{}", id), Some(&ada.token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn users_cannot_reach_each_others_entries() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;
    let bob = register(&app, "Bob", "bob@example.com").await?;

    let (_, created) = create(&app, &ada, "incomes", json!({ "name": "Salary", "category": "salary", "amount": 10 })).await?;
    let id = created["data"]["_id"].as_str().unwrap_or_default().to_string();

    let (status, _) = send(&app, Method::GET, &format!("/incomes/{}", ada.id), Some(&bob.token), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, &format!("/incomes/total/{}", ada.id), Some(&bob.token), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, &format!("/incomes/single/{}", id), Some(&bob.token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/incomes/{}", id), Some(&bob.token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = create(
        &app,
        &bob,
        "incomes",
        json!({ "user_id": ada.id, "name": "Sneaky", "category": "other", "amount": 1 }),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn malformed_id_is_a_bad_request() -> Result<()> {
    let app = test_app();
    let ada = register(&app, "Ada", "ada@example.com").await?;

    let (status, body) = send(&app, Method::GET, "/expenses/single/not-a-uuid", Some(&ada.token), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Invalid id \"not-a-uuid\"");
    Ok(())
}
