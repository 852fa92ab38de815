mod common;

use axum::http::{StatusCode, header};
use common::{body_json, body_text, create_test_user, json_request, setup_test_app};
use serde_json::{Value, json};
use skillbridge_models::UserRole;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

fn contact_payload(name: &str, message: &str) -> Value {
    json!({
        "name": name,
        "email": "visitor@example.com",
        "phone": "+251911223344",
        "message": message
    })
}

async fn submit(app: &axum::Router, name: &str, message: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/contact", None, Some(contact_payload(name, message))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_submission(pool: PgPool) {
    let app = setup_test_app(pool);

    let body = submit(&app, "  Abebe  ", "When does the next cohort start?").await;

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Message sent successfully");
    assert_eq!(body["data"]["name"], "Abebe");
    assert_eq!(body["data"]["status"], "new");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_blank_field_rejected(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/contact",
            None,
            Some(contact_payload("   ", "Hello")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "All fields are required");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contact_messages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_lists_with_status_and_search(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let first = submit(&app, "Abebe", "Question about pricing").await;
    submit(&app, "Sara", "Partnership inquiry").await;

    let id = first["data"]["id"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/contact/{id}/status"),
            Some(&admin.token),
            Some(json!({ "status": "read" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Status updated successfully");
    assert_eq!(body["data"]["status"], "read");

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/contact?status=new", Some(&admin.token), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Sara");

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/contact?search=PRICING", Some(&admin.token), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let response = app
        .oneshot(json_request("GET", "/api/contact?status=archived", Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_listing_requires_admin(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request("GET", "/api/contact", Some(&student.token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_export_csv(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    submit(&app, "Abebe", "He said \"hi\"").await;

    let response = app
        .oneshot(json_request("GET", "/api/contact/export/csv", Some(&admin.token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"contact-messages.csv\""
    );

    let csv = body_text(response).await;
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "\"id\",\"name\",\"email\",\"phone\",\"message\",\"status\",\"createdAt\",\"updatedAt\""
    );
    assert!(lines.next().unwrap().contains("\"He said \"\"hi\"\"\""));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_and_delete_message(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let created = submit(&app, "Abebe", "Please call me back").await;
    let uri = format!("/api/contact/{}", created["data"]["id"].as_str().unwrap());

    let response = app
        .clone()
        .oneshot(json_request("DELETE", &uri, Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Message deleted successfully");

    let response = app
        .clone()
        .oneshot(json_request("GET", &uri, Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Message not found");

    let response = app
        .oneshot(json_request(
            "DELETE",
            &format!("/api/contact/{}", Uuid::new_v4()),
            Some(&admin.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
