mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, generate_unique_email, json_request, setup_test_app};
use serde_json::json;
use skillbridge_models::UserRole;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_admin_with_profile(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let super_admin = create_test_user(&pool, UserRole::SuperAdmin).await;
    let email = generate_unique_email();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admins",
            Some(&super_admin.token),
            Some(json!({
                "name": "Selam Girma",
                "email": email,
                "password": "secret123",
                "role": "SUPPORT"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Admin user created");
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["role"], "SUPPORT");
    assert_eq!(body["user"]["status"], "ACTIVE");
    assert!(body["user"]["adminProfile"]["id"].is_string());
    assert!(body["user"].get("passwordHash").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_admin_duplicate_email_ignores_case(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, UserRole::Admin).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admins",
            Some(&admin.token),
            Some(json!({
                "name": "Selam Girma",
                "email": admin.email.to_uppercase(),
                "password": "secret123"
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "User already exists");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE LOWER(email) = $1")
        .bind(&admin.email)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_role_must_be_admin_tier(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, UserRole::Admin).await;

    for role in ["STUDENT", "INSTRUCTOR"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/admins",
                Some(&admin.token),
                Some(json!({
                    "name": "Selam Girma",
                    "email": generate_unique_email(),
                    "password": "secret123",
                    "role": role
                })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "role {role}");
        assert!(body_json(response).await["details"].is_array());
    }

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admins/{}", admin.id),
            Some(&admin.token),
            Some(json!({ "role": "STUDENT" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let role: UserRole = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
        .bind(admin.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(role, UserRole::Admin);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_admin_removes_profile_and_user(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, UserRole::Admin).await;

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admins",
            Some(&admin.token),
            Some(json!({
                "name": "Selam Girma",
                "email": generate_unique_email(),
                "password": "secret123"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let id: Uuid = body_json(created).await["user"]["id"].as_str().unwrap().parse().unwrap();

    let response = app
        .clone()
        .oneshot(json_request("DELETE", &format!("/api/admins/{id}"), Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Admin user deleted");

    let profiles: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_profiles WHERE user_id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!((profiles, users), (0, 0));

    let response = app
        .oneshot(json_request("DELETE", &format!("/api/admins/{id}"), Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Admin not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_admin_skips_non_admin_users(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let student = create_test_user(&pool, UserRole::Student).await;

    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/admins/{}", student.id),
            Some(&admin.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = $1")
        .bind(student.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_search_treats_wildcards_literally(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, UserRole::Admin).await;

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/admins?search=_", Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    let response = app
        .oneshot(json_request("GET", "/api/admins?search=TEST%20USER", Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["email"], admin.email);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admins_routes_reject_instructors(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let instructor = create_test_user(&pool, UserRole::Instructor).await;

    let response = app
        .oneshot(json_request("GET", "/api/admins", Some(&instructor.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
