#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use estate_server::backend::database::DatabaseBackendConfig;
use estate_server::backend::{BackendFactory, EstateBackend};
use estate_server::config::AppConfig;
use estate_server::startup::{build_router, AppState};
use http::{header, HeaderValue, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

/// Create backend for testing with in-memory SQLite database
pub async fn setup_test_database() -> Result<Arc<dyn EstateBackend>, Box<dyn std::error::Error>> {
    let backend = BackendFactory::create(&DatabaseBackendConfig::memory_sqlite()).await?;
    Ok(backend)
}

/// Development defaults with a cheap bcrypt cost so tests stay fast
pub fn create_test_app_config() -> AppConfig {
    let mut config = AppConfig::default_config();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.password.bcrypt_cost = 4;
    config
}

/// Setup test application with a fresh in-memory database
pub async fn setup_test_app(config: AppConfig) -> Result<Router, Box<dyn std::error::Error>> {
    let backend = setup_test_database().await?;
    let state = AppState::new(backend, config)?;
    Ok(build_router(state))
}

pub async fn setup_test_server() -> TestServer {
    let app = setup_test_app(create_test_app_config()).await.unwrap();
    TestServer::new(app).unwrap()
}

/// Turn a `Set-Cookie` response header into a `Cookie` request header
pub fn session_cookie_from(set_cookie: &HeaderValue) -> HeaderValue {
    let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
    HeaderValue::from_str(pair).unwrap()
}

/// A signed-in test account
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub cookie: HeaderValue,
}

pub async fn signup(server: &TestServer, username: &str, email: &str, password: &str) {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({"username": username, "email": email, "password": password}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
}

/// Sign up and sign in a user named `username`, returning its session
pub async fn create_signed_in_user(server: &TestServer, username: &str) -> TestUser {
    let email = format!("{}@example.com", username);
    signup(server, username, &email, "secret-password").await;

    let response = server
        .post("/api/auth/signin")
        .json(&json!({"email": email, "password": "secret-password"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let cookie = session_cookie_from(&response.header(header::SET_COOKIE));
    let body: Value = response.json();

    TestUser {
        id: body["id"].as_str().unwrap().to_string(),
        email,
        cookie,
    }
}

pub fn create_test_listing_json(name: &str, regular_price: i64, listing_type: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{} with a view", name),
        "location": "Porto",
        "regularPrice": regular_price,
        "discountPrice": 0,
        "bedrooms": 2,
        "bathrooms": 1,
        "furnished": false,
        "parking": false,
        "type": listing_type,
        "offer": false,
        "imageUrls": ["https://images.example.com/1.jpg"]
    })
}

/// Create a listing as `owner` and return the stored record
pub async fn create_listing(server: &TestServer, owner: &TestUser, payload: &Value) -> Value {
    let response = server
        .post("/api/listing/create")
        .add_header(header::COOKIE, owner.cookie.clone())
        .json(payload)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}
