use axum::{Json, extract::State};
use skillbridge_core::AppError;
use tracing::instrument;

use crate::modules::dashboard::model::{ChartPoint, DashboardStats, SuccessResponse};
use crate::modules::dashboard::service::DashboardService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Headline metrics, recent applications and popular courses", body = DashboardStats),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin tier only")
    ),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<DashboardStats>>, AppError> {
    let stats = DashboardService::stats(&state.db).await?;
    Ok(Json(SuccessResponse::data(stats)))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/charts",
    responses(
        (status = 200, description = "Monthly counts for the last six months", body = Vec<ChartPoint>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin tier only")
    ),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_dashboard_charts(
    State(state): State<AppState>,
) -> Result<Json<SuccessResponse<Vec<ChartPoint>>>, AppError> {
    let points = DashboardService::charts(&state.db).await?;
    Ok(Json(SuccessResponse::data(points)))
}
