mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, json_request, setup_test_app};
use skillbridge_models::UserRole;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn seed_notification(pool: &PgPool, title: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO notifications (type, title, message) VALUES ('NEW_STUDENT', $1, 'A student registered') RETURNING id",
    )
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_and_read_flow(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let first = seed_notification(&pool, "First").await;
    seed_notification(&pool, "Second").await;
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/notifications", Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["notifications"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["notifications"][0]["type"], "NEW_STUDENT");
    assert_eq!(body["data"]["pagination"]["totalItems"], 2);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/notifications/{first}/read"),
            Some(&admin.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["isRead"], true);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/notifications/unread-count",
            Some(&admin.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["data"]["unreadCount"], 1);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/notifications?unreadOnly=true",
            Some(&admin.token),
            None,
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["notifications"][0]["title"], "Second");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/notifications/mark-all-read",
            Some(&admin.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/notifications/unread-count",
            Some(&admin.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["data"]["unreadCount"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_notification(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Support).await;
    let id = seed_notification(&pool, "Disposable").await;
    let app = setup_test_app(pool);

    let uri = format!("/api/notifications/{id}");
    let response = app
        .clone()
        .oneshot(json_request("DELETE", &uri, Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request("DELETE", &uri, Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Notification not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_notifications_require_admin_tier(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request("GET", "/api/notifications", Some(&student.token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
