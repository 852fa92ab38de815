mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_category, create_test_course, create_test_user, json_request,
    setup_test_app,
};
use skillbridge_models::UserRole;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_blank_query_rejected(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    for uri in ["/api/search?query=%20%20", "/api/search/quick"] {
        let response = app
            .clone()
            .oneshot(json_request("GET", uri, Some(&admin.token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Search query is required");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_global_search_finds_course(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let category_id = create_test_category(&pool, "Programming").await;
    create_test_course(&pool, category_id, admin.id).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request("GET", "/api/search?query=rust", Some(&admin.token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["query"], "rust");
    assert_eq!(body["type"], "all");
    assert_eq!(body["results"]["courses"][0]["title"], "Rust Fundamentals");
    assert_eq!(body["results"]["courses"][0]["categoryName"], "Programming");
    assert_eq!(body["summary"]["courses"], 1);
    assert_eq!(body["summary"]["total"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_type_restricts_entities(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let category_id = create_test_category(&pool, "Programming").await;
    create_test_course(&pool, category_id, admin.id).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/search?query=rust&type=students",
            Some(&admin.token),
            None,
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["summary"]["courses"], 0);
    assert_eq!(body["results"]["courses"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_course_search_paginates(pool: PgPool) {
    let instructor = create_test_user(&pool, UserRole::Instructor).await;
    let category_id = create_test_category(&pool, "Programming").await;
    create_test_course(&pool, category_id, instructor.id).await;
    create_test_course(&pool, category_id, instructor.id).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/search/courses?limit=1",
            Some(&instructor.token),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["courses"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["totalItems"], 2);
    assert_eq!(body["pagination"]["hasNextPage"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_cannot_search(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request("GET", "/api/search?query=rust", Some(&student.token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
