#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::Value;
use skillbridge::router::init_router;
use skillbridge::state::AppState;
use skillbridge_auth::create_access_token;
use skillbridge_config::{CorsConfig, JwtConfig, RateLimitConfig, UploadConfig};
use skillbridge_core::hash_password;
use skillbridge_models::UserRole;
use sqlx::PgPool;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "password123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    let upload_dir = std::env::temp_dir().join(format!("skillbridge-test-{}", Uuid::new_v4()));

    AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        RateLimitConfig::default(),
        UploadConfig {
            dir: upload_dir,
            base_url: "http://localhost:3000/uploads".to_string(),
            ..UploadConfig::default()
        },
    )
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub token: String,
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Inserts an active user with the given role and issues an access token for it.
pub async fn create_test_user(pool: &PgPool, role: UserRole) -> TestUser {
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind("Test User")
    .bind(&email)
    .bind(hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    let token = create_access_token(id, &email, role, &test_jwt_config()).unwrap();

    TestUser {
        id,
        email,
        role,
        token,
    }
}

pub async fn create_test_category(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Inserts a bare published course.
pub async fn create_test_course(pool: &PgPool, category_id: Uuid, instructor_id: Uuid) -> Uuid {
    sqlx::query_scalar(
        r#"INSERT INTO courses (title, short_description, detailed_description, price_original,
                               price_discounted, status, level, duration, category_id, instructor_id)
           VALUES ('Rust Fundamentals', 'Learn Rust from scratch', 'A detailed walk through ownership and traits',
                   1500, 1200, 'PUBLISHED', 'BEGINNER', '8 weeks', $1, $2)
           RETURNING id"#,
    )
    .bind(category_id)
    .bind(instructor_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
