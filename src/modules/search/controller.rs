use axum::{
    Json,
    extract::{Query, State},
};
use skillbridge_core::AppError;
use tracing::instrument;

use crate::modules::search::model::{
    ApplicationSearchQuery, ApplicationSearchResponse, CourseSearchQuery, CourseSearchResponse,
    QuickSearchQuery, QuickSearchResponse, SearchQuery, SearchResponse, StudentSearchQuery,
    StudentSearchResponse,
};
use crate::modules::search::service::SearchService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matches grouped by entity", body = SearchResponse),
        (status = 400, description = "Search query is required"),
        (status = 403, description = "Forbidden - staff only")
    ),
    tag = "Search",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn global_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let response = SearchService::search(&state.db, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/search/quick",
    params(QuickSearchQuery),
    responses(
        (status = 200, description = "A few matches of each kind", body = QuickSearchResponse),
        (status = 400, description = "Search query is required")
    ),
    tag = "Search",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn quick_search(
    State(state): State<AppState>,
    Query(query): Query<QuickSearchQuery>,
) -> Result<Json<QuickSearchResponse>, AppError> {
    let response = SearchService::quick(&state.db, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/search/applications",
    params(ApplicationSearchQuery),
    responses((status = 200, description = "Page of matching applications", body = ApplicationSearchResponse)),
    tag = "Search",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn search_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationSearchQuery>,
) -> Result<Json<ApplicationSearchResponse>, AppError> {
    let response = SearchService::applications(&state.db, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/search/students",
    params(StudentSearchQuery),
    responses((status = 200, description = "Page of matching students", body = StudentSearchResponse)),
    tag = "Search",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn search_students(
    State(state): State<AppState>,
    Query(query): Query<StudentSearchQuery>,
) -> Result<Json<StudentSearchResponse>, AppError> {
    let response = SearchService::students(&state.db, query).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/search/courses",
    params(CourseSearchQuery),
    responses((status = 200, description = "Page of matching courses", body = CourseSearchResponse)),
    tag = "Search",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn search_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseSearchQuery>,
) -> Result<Json<CourseSearchResponse>, AppError> {
    let response = SearchService::courses(&state.db, query).await?;
    Ok(Json(response))
}
