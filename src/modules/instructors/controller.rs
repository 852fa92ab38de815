use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use skillbridge_core::AppError;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::instructors::model::{
    CreateInstructorDto, InstructorQuery, InstructorWithUser, MessageResponse, UpdateInstructorDto,
};
use crate::modules::instructors::service::InstructorService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/instructors",
    params(InstructorQuery),
    responses(
        (status = 200, description = "Instructors with user and expertise", body = Vec<InstructorWithUser>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Instructors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_instructors(
    State(state): State<AppState>,
    Query(query): Query<InstructorQuery>,
) -> Result<Json<Vec<InstructorWithUser>>, AppError> {
    Ok(Json(InstructorService::list(&state.db, query).await?))
}

#[utoipa::path(
    get,
    path = "/api/instructors/{id}",
    params(("id" = Uuid, Path, description = "Instructor profile ID")),
    responses(
        (status = 200, description = "Instructor details", body = InstructorWithUser),
        (status = 404, description = "Instructor not found")
    ),
    tag = "Instructors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_instructor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InstructorWithUser>, AppError> {
    Ok(Json(InstructorService::get(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/api/instructors",
    request_body = CreateInstructorDto,
    responses(
        (status = 201, description = "Instructor profile created", body = InstructorWithUser),
        (status = 404, description = "User not found"),
        (status = 409, description = "Profile already exists")
    ),
    tag = "Instructors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_instructor(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateInstructorDto>,
) -> Result<(StatusCode, Json<InstructorWithUser>), AppError> {
    let instructor = InstructorService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(instructor)))
}

#[utoipa::path(
    put,
    path = "/api/instructors/{id}",
    params(("id" = Uuid, Path, description = "Instructor profile ID")),
    request_body = UpdateInstructorDto,
    responses(
        (status = 200, description = "Instructor updated", body = InstructorWithUser),
        (status = 404, description = "Instructor not found")
    ),
    tag = "Instructors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_instructor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateInstructorDto>,
) -> Result<Json<InstructorWithUser>, AppError> {
    Ok(Json(InstructorService::update(&state.db, id, dto).await?))
}

#[utoipa::path(
    delete,
    path = "/api/instructors/{id}",
    params(("id" = Uuid, Path, description = "Instructor profile ID")),
    responses(
        (status = 200, description = "Instructor deleted", body = MessageResponse),
        (status = 404, description = "Instructor not found")
    ),
    tag = "Instructors",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_instructor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    InstructorService::delete(&state.db, id).await?;
    Ok(Json(MessageResponse::new("Instructor deleted")))
}
