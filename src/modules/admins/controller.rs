use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use skillbridge_core::AppError;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::admins::model::{
    AdminMutationResponse, AdminQuery, AdminWithProfile, CreateAdminDto, MessageResponse,
    UpdateAdminDto,
};
use crate::modules::admins::service::AdminService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/admins",
    params(AdminQuery),
    responses(
        (status = 200, description = "Admin-tier users, newest first", body = Vec<AdminWithProfile>),
        (status = 403, description = "Forbidden - admin tier only")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_admins(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<Vec<AdminWithProfile>>, AppError> {
    Ok(Json(AdminService::list(&state.db, query).await?))
}

#[utoipa::path(
    post,
    path = "/api/admins",
    request_body = CreateAdminDto,
    responses(
        (status = 201, description = "Admin user created", body = AdminMutationResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "User already exists")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAdminDto>,
) -> Result<(StatusCode, Json<AdminMutationResponse>), AppError> {
    let user = AdminService::create(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(AdminMutationResponse {
            message: "Admin user created".to_string(),
            user,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admins/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateAdminDto,
    responses(
        (status = 200, description = "Admin user updated", body = AdminMutationResponse),
        (status = 404, description = "Admin not found"),
        (status = 409, description = "Email already in use")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateAdminDto>,
) -> Result<Json<AdminMutationResponse>, AppError> {
    let user = AdminService::update(&state.db, id, dto).await?;
    Ok(Json(AdminMutationResponse {
        message: "Admin user updated".to_string(),
        user,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/admins/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Admin user deleted", body = MessageResponse),
        (status = 404, description = "Admin not found"),
        (status = 409, description = "User still referenced")
    ),
    tag = "Admins",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    AdminService::delete(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Admin user deleted")))
}
