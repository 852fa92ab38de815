use axum::{
    Json,
    extract::{Path, Query, State},
};
use skillbridge_core::AppError;
use skillbridge_models::SuccessResponse;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::notifications::model::{
    Notification, NotificationPage, NotificationQuery, UnreadCount,
};
use crate::modules::notifications::service::NotificationService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/notifications",
    params(NotificationQuery),
    responses(
        (status = 200, description = "Page of notifications, newest first", body = NotificationPage),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin tier only")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<SuccessResponse<NotificationPage>>, AppError> {
    let page = NotificationService::list(&state.db, query).await?;
    Ok(Json(SuccessResponse::data(page)))
}

#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    responses(
        (status = 200, description = "Number of unread notifications", body = UnreadCount),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin tier only")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_unread_count(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<UnreadCount>>, AppError> {
    let unread_count = NotificationService::unread_count(&state.db).await?;
    Ok(Json(SuccessResponse::data(UnreadCount { unread_count })))
}

#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked as read", body = Notification),
        (status = 404, description = "Notification not found")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn mark_as_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse<Notification>>, AppError> {
    let notification = NotificationService::mark_read(&state.db, id).await?;
    Ok(Json(SuccessResponse::message_with(
        "Notification marked as read",
        notification,
    )))
}

#[utoipa::path(
    put,
    path = "/api/notifications/mark-all-read",
    responses((status = 200, description = "All notifications marked as read")),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn mark_all_as_read(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<()>>, AppError> {
    let updated = NotificationService::mark_all_read(&state.db).await?;
    tracing::debug!(updated, "Marked notifications as read");
    Ok(Json(SuccessResponse::message(
        "All notifications marked as read",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification deleted"),
        (status = 404, description = "Notification not found")
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuccessResponse<()>>, AppError> {
    NotificationService::delete(&state.db, id).await?;
    Ok(Json(SuccessResponse::message("Notification deleted")))
}
