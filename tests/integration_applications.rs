mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    TestUser, body_json, create_test_category, create_test_course, create_test_user,
    json_request, setup_test_app,
};
use serde_json::{Value, json};
use skillbridge_models::UserRole;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

const BOUNDARY: &str = "skillbridge-test-boundary";

fn application_payload(course_id: Uuid) -> Value {
    json!({
        "courseId": course_id,
        "paymentMethod": "TELEBIRR",
        "paymentReference": "TXN-12345",
        "fullName": "Liya Tesfaye",
        "dateOfBirth": "2000-01-15T00:00:00Z",
        "gender": "Female",
        "email": "liya@example.com",
        "phone": "+251911000000",
        "address": "Bole, Addis Ababa"
    })
}

fn multipart_request(token: &str, course_id: Uuid, receipt: Option<(&str, &[u8])>) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    let payload = application_payload(course_id);
    for (name, value) in payload.as_object().unwrap() {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{}\r\n",
                value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string())
            )
            .as_bytes(),
        );
    }

    if let Some((content_type, data)) = receipt {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"receipt\"; filename=\"receipt\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/applications/with-receipt")
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

async fn setup_course(pool: &PgPool) -> (TestUser, Uuid) {
    let admin = create_test_user(pool, UserRole::Admin).await;
    let category_id = create_test_category(pool, "Data Science").await;
    let course_id = create_test_course(pool, category_id, admin.id).await;
    (admin, course_id)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_application_for_missing_course_is_404(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/applications",
            Some(&student.token),
            Some(application_payload(Uuid::new_v4())),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Course not found");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student_applications")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_submits_application(pool: PgPool) {
    let (_, course_id) = setup_course(&pool).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/applications",
            Some(&student.token),
            Some(application_payload(course_id)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["studentId"], student.id.to_string());
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["courseTitle"], "Rust Fundamentals");

    let notifications: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE type = 'NEW_APPLICATION'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(notifications, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_cannot_use_student_route(pool: PgPool) {
    let (admin, course_id) = setup_course(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/applications",
            Some(&admin.token),
            Some(application_payload(course_id)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_students_only_see_their_own_applications(pool: PgPool) {
    let (admin, course_id) = setup_course(&pool).await;
    let owner = create_test_user(&pool, UserRole::Student).await;
    let other = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/applications",
            Some(&owner.token),
            Some(application_payload(course_id)),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["id"].as_str().unwrap().to_string();
    let uri = format!("/api/applications/{id}");

    let as_other = app
        .clone()
        .oneshot(json_request("GET", &uri, Some(&other.token), None))
        .await
        .unwrap();
    assert_eq!(as_other.status(), StatusCode::FORBIDDEN);

    let as_owner = app
        .clone()
        .oneshot(json_request("GET", &uri, Some(&owner.token), None))
        .await
        .unwrap();
    assert_eq!(as_owner.status(), StatusCode::OK);

    let as_admin = app
        .clone()
        .oneshot(json_request("GET", &uri, Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(as_admin.status(), StatusCode::OK);

    let mine = app
        .oneshot(json_request("GET", "/api/applications/me", Some(&other.token), None))
        .await
        .unwrap();
    assert_eq!(body_json(mine).await.as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_review_records_reviewer(pool: PgPool) {
    let (admin, course_id) = setup_course(&pool).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool.clone());

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/applications",
            Some(&student.token),
            Some(application_payload(course_id)),
        ))
        .await
        .unwrap();
    let id = body_json(created).await["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/applications/{id}"),
            Some(&admin.token),
            Some(json!({ "status": "APPROVED", "adminNotes": "Payment confirmed" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "APPROVED");
    assert_eq!(body["reviewedBy"], admin.id.to_string());
    assert!(body["reviewedAt"].is_string());

    let approved: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM notifications WHERE type = 'APPLICATION_APPROVED'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(approved, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_review_missing_application_is_404(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/applications/{}", Uuid::new_v4()),
            Some(&admin.token),
            Some(json!({ "status": "REJECTED" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_with_receipt_requires_file(pool: PgPool) {
    let (_, course_id) = setup_course(&pool).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(multipart_request(&student.token, course_id, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Receipt file is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_with_receipt_stores_file(pool: PgPool) {
    let (_, course_id) = setup_course(&pool).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
    let response = app
        .clone()
        .oneshot(multipart_request(&student.token, course_id, Some(("image/png", &png[..]))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Application submitted successfully with receipt");

    let receipt_url = body["application"]["receiptUrl"].as_str().unwrap();
    assert!(receipt_url.starts_with("http://localhost:3000/uploads/receipts/receipt_"));
    assert!(receipt_url.ends_with(".png"));

    let id = body["application"]["id"].as_str().unwrap();
    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/applications/{id}/receipt"),
            Some(&student.token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["url"], receipt_url);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_with_receipt_rejects_spoofed_type(pool: PgPool) {
    let (_, course_id) = setup_course(&pool).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(multipart_request(
            &student.token,
            course_id,
            Some(("application/pdf", &b"not really a pdf"[..])),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student_applications")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_matches_literal_percent(pool: PgPool) {
    let (admin, course_id) = setup_course(&pool).await;
    let student = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/applications",
            Some(&student.token),
            Some(application_payload(course_id)),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let literal = app
        .clone()
        .oneshot(json_request("GET", "/api/applications?search=TXN%25", Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(literal.status(), StatusCode::OK);
    assert_eq!(body_json(literal).await.as_array().unwrap().len(), 0);

    let partial = app
        .oneshot(json_request("GET", "/api/applications?search=txn-123", Some(&admin.token), None))
        .await
        .unwrap();
    assert_eq!(partial.status(), StatusCode::OK);
    assert_eq!(body_json(partial).await.as_array().unwrap().len(), 1);
}
