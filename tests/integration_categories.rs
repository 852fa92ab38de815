mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_category, create_test_course, create_test_user, json_request,
    setup_test_app,
};
use serde_json::json;
use skillbridge_models::UserRole;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_navbar_lists_active_categories_only(pool: PgPool) {
    create_test_category(&pool, "Web Development").await;
    create_test_category(&pool, "Business").await;
    sqlx::query("INSERT INTO categories (name, status) VALUES ('Archived', 'INACTIVE')")
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool);
    let response = app
        .oneshot(json_request("GET", "/api/categories/navbar", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Business", "Web Development"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_creates_category(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/categories",
            Some(&admin.token),
            Some(json!({ "name": "  Design  ", "description": "UI and UX" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Design");
    assert_eq!(body["status"], "ACTIVE");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_category_name_conflicts(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    create_test_category(&pool, "Design").await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/categories",
            Some(&admin.token),
            Some(json!({ "name": "Design" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "Category with this name already exists"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_instructor_cannot_create_category(pool: PgPool) {
    let instructor = create_test_user(&pool, UserRole::Instructor).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/categories",
            Some(&instructor.token),
            Some(json!({ "name": "Design" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_category_in_use_conflicts(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let category_id = create_test_category(&pool, "Programming").await;
    create_test_course(&pool, category_id, admin.id).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/categories/{category_id}"),
            Some(&admin.token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE id = $1")
        .bind(category_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_unused_category(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let category_id = create_test_category(&pool, "Marketing").await;
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/categories/{category_id}"),
            Some(&admin.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/categories/{category_id}"),
            Some(&admin.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_category_is_404(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/categories/{}", Uuid::new_v4()),
            Some(&admin.token),
            Some(json!({ "name": "Anything" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
