use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use skillbridge_core::AppError;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::contact::model::{
    ContactMessage, ContactQuery, ContactStatusUpdated, CreateContactDto, MessageResponse,
    SuccessResponse, UpdateContactStatusDto, contact_messages_csv,
};
use crate::modules::contact::service::ContactService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Message received", body = ContactMessage),
        (status = 400, description = "All fields are required")
    ),
    tag = "Contact"
)]
#[instrument(skip(state, dto))]
pub async fn submit_contact_message(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateContactDto>,
) -> Result<(StatusCode, Json<SuccessResponse<ContactMessage>>), AppError> {
    let message = ContactService::create(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::message_with("Message sent successfully", message)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/contact",
    params(ContactQuery),
    responses(
        (status = 200, description = "Contact messages, newest first", body = Vec<ContactMessage>),
        (status = 400, description = "Invalid status filter"),
        (status = 403, description = "Forbidden - admin tier only")
    ),
    tag = "Contact",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_contact_messages(
    State(state): State<AppState>,
    Query(query): Query<ContactQuery>,
) -> Result<Json<SuccessResponse<Vec<ContactMessage>>>, AppError> {
    let messages = ContactService::list(&state.db, query).await?;
    Ok(Json(SuccessResponse::data(messages)))
}

#[utoipa::path(
    get,
    path = "/api/contact/{id}",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Contact message", body = ContactMessage),
        (status = 404, description = "Message not found")
    ),
    tag = "Contact",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_contact_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse<ContactMessage>>, AppError> {
    let message = ContactService::get(&state.db, id).await?;
    Ok(Json(SuccessResponse::data(message)))
}

#[utoipa::path(
    patch,
    path = "/api/contact/{id}/status",
    params(("id" = Uuid, Path, description = "Message ID")),
    request_body = UpdateContactStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ContactStatusUpdated),
        (status = 404, description = "Message not found")
    ),
    tag = "Contact",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_contact_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateContactStatusDto>,
) -> Result<Json<ContactStatusUpdated>, AppError> {
    let message = ContactService::update_status(&state.db, id, dto.status).await?;
    Ok(Json(ContactStatusUpdated {
        message: "Status updated successfully".to_string(),
        data: message,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/contact/{id}",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message deleted", body = MessageResponse),
        (status = 404, description = "Message not found")
    ),
    tag = "Contact",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_contact_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    ContactService::delete(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Message deleted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/contact/export/csv",
    responses((status = 200, description = "All messages as CSV", content_type = "text/csv", body = String)),
    tag = "Contact",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn export_contact_messages(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let messages = ContactService::all(&state.db).await?;
    tracing::info!(rows = messages.len(), "Exporting contact messages");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"contact-messages.csv\"",
            ),
        ],
        contact_messages_csv(&messages),
    ))
}
