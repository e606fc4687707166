//! User endpoints against a real database.
//!
//! Run with: cargo test --test users_tests -- --ignored --test-threads=1

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::{json, Value};

fn user(username: &str, password: &str) -> Value {
    json!({
        "id": 0,
        "username": username,
        "firstName": "John",
        "lastName": "Doe",
        "email": format!("{}@example.com", username),
        "password": password,
        "phone": "555-0100",
        "userStatus": 1,
    })
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn created_user_hides_password_and_stores_a_hash() {
    let ctx = TestContext::new().await;
    let (status, created) = ctx.post_json("/user", user("jdoe", "s3cret")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["username"], "jdoe");
    assert_eq!(created["firstName"], "John");
    assert!(created.get("password").is_none());

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE username = 'jdoe'")
        .fetch_one(&ctx.pool)
        .await
        .unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(!hash.contains("s3cret"));

    let (status, fetched) = ctx.get("/user/jdoe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn duplicate_username_is_a_conflict() {
    let ctx = TestContext::new().await;
    assert_eq!(ctx.post_json("/user", user("jdoe", "a")).await.0, StatusCode::OK);
    let (status, body) = ctx.post_json("/user", user("jdoe", "b")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn bulk_create_returns_stored_users_in_id_order() {
    let ctx = TestContext::new().await;
    let (status, users) = ctx
        .post_json("/user/createWithList", json!([user("zed", "a"), user("amy", "b")]))
        .await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["username"], "zed");
    assert_eq!(users[1]["username"], "amy");
    assert!(users[0]["id"].as_i64() < users[1]["id"].as_i64());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn bulk_create_is_all_or_nothing() {
    let ctx = TestContext::new().await;
    ctx.post_json("/user", user("taken", "a")).await;
    let (status, _) = ctx
        .post_json("/user/createWithList", json!([user("fresh", "a"), user("taken", "b")]))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(ctx.get("/user/fresh").await.0, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn update_replaces_fields_but_keeps_username() {
    let ctx = TestContext::new().await;
    ctx.post_json("/user", user("jdoe", "a")).await;
    let mut changed = user("ignored", "b");
    changed["firstName"] = json!("Jane");
    changed["userStatus"] = json!(2);

    let (status, updated) = ctx.put_json("/user/jdoe", changed.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["username"], "jdoe");
    assert_eq!(updated["firstName"], "Jane");
    assert_eq!(updated["userStatus"], 2);

    let (status, _) = ctx.put_json("/user/nobody", changed).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn deleted_user_is_gone() {
    let ctx = TestContext::new().await;
    ctx.post_json("/user", user("jdoe", "a")).await;
    let (status, body) = ctx.delete("/user/jdoe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User with username jdoe has been deleted successfully.");
    assert_eq!(ctx.get("/user/jdoe").await.0, StatusCode::NOT_FOUND);
    assert_eq!(ctx.delete("/user/jdoe").await.0, StatusCode::NOT_FOUND);
}
