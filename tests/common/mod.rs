//! Shared setup for the database-backed tests.
//!
//! These tests require a running PostgreSQL server and truncate every pet store table.
//! Run with: DATABASE_URL=postgres://postgres@localhost/petstore_test cargo test -- --ignored --test-threads=1

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use petstore_api::{app, ensure_database_exists, ensure_tables, AppState, Gateway, LocalImageStore, Settings};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://postgres@localhost/petstore_test".to_string())
}

pub struct TestContext {
    pub pool: PgPool,
    pub app: Router,
    pub upload_dir: TempDir,
}

impl TestContext {
    /// Empty tables with categories 1 (Dogs) and 2 (Cats) seeded; ids restart at 1.
    pub async fn new() -> Self {
        let url = database_url();
        ensure_database_exists(&url).await.expect("create test database");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .expect("connect to test database");
        ensure_tables(&pool).await.expect("create tables");
        sqlx::query("TRUNCATE pet_tags, orders, pets, tags, categories, users RESTART IDENTITY")
            .execute(&pool)
            .await
            .expect("truncate");
        sqlx::query("INSERT INTO categories (name) VALUES ('Dogs'), ('Cats')")
            .execute(&pool)
            .await
            .expect("seed categories");

        let upload_dir = tempfile::tempdir().expect("tempdir");
        let dir = upload_dir.path().to_string_lossy().into_owned();
        let settings = Settings::from_lookup(move |key| (key == "UPLOAD_DIR").then(|| dir.clone())).expect("settings");
        let images = LocalImageStore::new(upload_dir.path()).await.expect("image store");
        let state = AppState::new(Gateway::new(pool.clone()), Arc::new(images));
        let app = app(state, &settings);
        TestContext { pool, app, upload_dir }
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.app.clone().oneshot(req).await.expect("router call");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("POST", uri, body)).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request("PUT", uri, body)).await
    }

    pub async fn upload(&self, pet_id: i64, filename: &str, content_type: &str, bytes: &str) -> (StatusCode, Value) {
        let boundary = "PETSTOREBOUNDARY";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n{bytes}\r\n--{b}--\r\n",
            b = boundary,
        );
        let req = Request::post(format!("/pet/{}/uploadImage", pet_id))
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }

    /// Create a pet in category 1 and return its JSON.
    pub async fn create_pet(&self, name: &str, status: &str, tags: &[&str], photo_urls: &[&str]) -> Value {
        let tags: Vec<Value> = tags.iter().map(|t| serde_json::json!({ "name": t })).collect();
        let (code, pet) = self
            .post_json(
                "/pet",
                serde_json::json!({
                    "category": { "id": 1, "name": "Dogs" },
                    "name": name,
                    "photoUrls": photo_urls,
                    "tags": tags,
                    "status": status,
                }),
            )
            .await;
        assert_eq!(code, StatusCode::OK, "create pet failed: {}", pet);
        pet
    }

    pub async fn count(&self, sql: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(sql).fetch_one(&self.pool).await.expect("count query")
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn tag_names(pet: &Value) -> Vec<String> {
    let mut names: Vec<String> = pet["tags"]
        .as_array()
        .map(|tags| tags.iter().filter_map(|t| t["name"].as_str().map(String::from)).collect())
        .unwrap_or_default();
    names.sort();
    names
}
