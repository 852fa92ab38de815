use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::auth::require_auth;
use crate::middleware::role::{require_admin, require_staff};
use crate::modules::admins::init_admins_router;
use crate::modules::applications::init_applications_router;
use crate::modules::auth::init_auth_router;
use crate::modules::categories::init_categories_router;
use crate::modules::contact::init_contact_router;
use crate::modules::courses::init_courses_router;
use crate::modules::dashboard::init_dashboard_router;
use crate::modules::instructors::init_instructors_router;
use crate::modules::notifications::init_notifications_router;
use crate::modules::search::init_search_router;
use crate::modules::settings::init_settings_router;
use crate::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Wraps a router so that every route requires an authenticated admin-tier user.
fn admin_only(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

fn staff_only(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .route_layer(middleware::from_fn_with_state(state.clone(), require_staff))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    // Credentials cannot be combined with a wildcard origin.
    if state.cors_config.allows_any() {
        return layer.allow_origin(AllowOrigin::any());
    }

    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer
        .allow_origin(allowed_origins)
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let auth_router = match state.rate_limit_config.auth_governor_config() {
        Some(config) => {
            tracing::info!(
                per_second = state.rate_limit_config.auth_per_second,
                burst_size = state.rate_limit_config.auth_burst_size,
                "Rate limiting enabled for /api/auth"
            );
            init_auth_router(&state).layer(GovernorLayer::new(config))
        }
        None => init_auth_router(&state),
    };

    let api = Router::new()
        .nest("/auth", auth_router)
        .nest("/courses", init_courses_router(&state))
        .nest("/categories", init_categories_router(&state))
        .nest("/instructors", init_instructors_router(&state))
        .nest("/admins", admin_only(init_admins_router(), &state))
        .nest("/applications", init_applications_router(&state))
        .nest("/settings", admin_only(init_settings_router(), &state))
        .nest("/dashboard", admin_only(init_dashboard_router(), &state))
        .nest(
            "/notifications",
            admin_only(init_notifications_router(), &state),
        )
        .nest("/search", staff_only(init_search_router(), &state))
        .nest("/contact", init_contact_router(&state));

    Router::new()
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(&state.upload_config.dir))
        .with_state(state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(logging_middleware))
                .layer(middleware::from_fn(metrics_middleware))
                .layer(cors_layer(&state)),
        )
}
