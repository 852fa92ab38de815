use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use skillbridge_core::AppError;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::middleware::auth::AuthUser;
use crate::modules::applications::model::{
    Application, ApplicationQuery, ApplicationWithReceiptResponse, CreateApplicationDto,
    ReceiptUrlResponse, UpdateApplicationDto,
};
use crate::modules::applications::service::ApplicationService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// A file part read from a multipart body.
struct UploadedFile {
    content_type: String,
    data: Vec<u8>,
}

/// Collects every text part plus the file part named `file_field`.
async fn read_multipart(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<(Vec<(String, String)>, Option<UploadedFile>), AppError> {
    let mut fields = Vec::new();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Failed to read upload: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == file_field {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field.bytes().await.map_err(|e| {
                AppError::bad_request(anyhow::anyhow!("Failed to read file data: {}", e))
            })?;
            file = Some(UploadedFile {
                content_type,
                data: data.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(|e| {
                AppError::bad_request(anyhow::anyhow!("Failed to read field '{}': {}", name, e))
            })?;
            fields.push((name, value));
        }
    }

    Ok((fields, file))
}

fn ensure_owner_or_staff(auth_user: &AuthUser, application: &Application) -> Result<(), AppError> {
    if auth_user.can_access_owned_by(application.student_id) {
        Ok(())
    } else {
        Err(AppError::forbidden("Unauthorized access"))
    }
}

#[utoipa::path(
    get,
    path = "/api/applications",
    params(ApplicationQuery),
    responses(
        (status = 200, description = "Applications, newest first", body = Vec<Application>),
        (status = 403, description = "Forbidden - staff only")
    ),
    tag = "Applications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationQuery>,
) -> Result<Json<Vec<Application>>, AppError> {
    Ok(Json(ApplicationService::list(&state.db, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/applications/me",
    responses(
        (status = 200, description = "The caller's applications", body = Vec<Application>),
        (status = 403, description = "Forbidden - students only")
    ),
    tag = "Applications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id()))]
pub async fn get_my_applications(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = ApplicationService::list_for_student(&state.db, auth_user.user_id()).await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application details", body = Application),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Application not found")
    ),
    tag = "Applications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id()))]
pub async fn get_application(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>, AppError> {
    let application = ApplicationService::get(&state.db, id).await?;
    ensure_owner_or_staff(&auth_user, &application)?;
    Ok(Json(application))
}

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationDto,
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Course not found")
    ),
    tag = "Applications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id()))]
pub async fn create_application(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateApplicationDto>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let application = ApplicationService::create(&state.db, auth_user.user_id(), dto, None).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// Multipart variant: application fields as text parts plus a `receipt` file.
#[utoipa::path(
    post,
    path = "/api/applications/with-receipt",
    request_body(content = String, content_type = "multipart/form-data", description = "Application fields plus a `receipt` file (PDF, JPEG or PNG)"),
    responses(
        (status = 201, description = "Application submitted with receipt", body = ApplicationWithReceiptResponse),
        (status = 400, description = "Invalid input or receipt"),
        (status = 404, description = "Course not found")
    ),
    tag = "Applications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, multipart), fields(user.id = %auth_user.user_id()))]
pub async fn create_application_with_receipt(
    State(state): State<AppState>,
    auth_user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApplicationWithReceiptResponse>), AppError> {
    let (fields, receipt) = read_multipart(multipart, "receipt").await?;
    let receipt =
        receipt.ok_or_else(|| AppError::bad_request(anyhow::anyhow!("Receipt file is required")))?;

    let dto = CreateApplicationDto::from_form_fields(fields)
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid application fields: {}", e)))?;
    dto.validate().map_err(|errors| AppError::validation(&errors))?;

    let receipt_url =
        ApplicationService::store_receipt(state.storage.as_ref(), &receipt.content_type, &receipt.data)
            .await?;

    let application =
        ApplicationService::create(&state.db, auth_user.user_id(), dto, Some(receipt_url)).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationWithReceiptResponse {
            success: true,
            message: "Application submitted successfully with receipt".to_string(),
            application,
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body = UpdateApplicationDto,
    responses(
        (status = 200, description = "Application reviewed", body = Application),
        (status = 403, description = "Forbidden - staff only"),
        (status = 404, description = "Application not found")
    ),
    tag = "Applications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id()))]
pub async fn review_application(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateApplicationDto>,
) -> Result<Json<Application>, AppError> {
    let application = ApplicationService::review(&state.db, id, auth_user.user_id(), dto).await?;
    Ok(Json(application))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/receipt",
    params(("id" = Uuid, Path, description = "Application ID")),
    request_body(content = String, content_type = "multipart/form-data", description = "A `receipt` file (PDF, JPEG or PNG)"),
    responses(
        (status = 200, description = "Receipt stored", body = Application),
        (status = 400, description = "Missing or invalid file"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Application not found")
    ),
    tag = "Applications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, multipart), fields(user.id = %auth_user.user_id()))]
pub async fn upload_receipt(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Application>, AppError> {
    let application = ApplicationService::get(&state.db, id).await?;
    ensure_owner_or_staff(&auth_user, &application)?;

    let (_, receipt) = read_multipart(multipart, "receipt").await?;
    let receipt =
        receipt.ok_or_else(|| AppError::bad_request(anyhow::anyhow!("No file uploaded")))?;

    let url =
        ApplicationService::store_receipt(state.storage.as_ref(), &receipt.content_type, &receipt.data)
            .await?;

    Ok(Json(ApplicationService::set_receipt(&state.db, id, &url).await?))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}/receipt",
    params(("id" = Uuid, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Receipt URL", body = ReceiptUrlResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Receipt not found")
    ),
    tag = "Applications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id()))]
pub async fn get_receipt(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ReceiptUrlResponse>, AppError> {
    let application = ApplicationService::get(&state.db, id).await?;
    ensure_owner_or_staff(&auth_user, &application)?;

    let url = application
        .receipt_url
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Receipt not found")))?;

    Ok(Json(ReceiptUrlResponse { url }))
}
