use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
};

use crate::middleware::{
    auth::require_auth,
    role::{require_staff, require_student},
};
use crate::state::AppState;

use super::controller::{
    create_application, create_application_with_receipt, get_application, get_applications,
    get_my_applications, get_receipt, review_application, upload_receipt,
};

pub fn init_applications_router(state: &AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/{id}", get(get_application))
        .route("/{id}/receipt", get(get_receipt).post(upload_receipt))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let student = Router::new()
        .route("/", post(create_application))
        .route("/me", get(get_my_applications))
        .route("/with-receipt", post(create_application_with_receipt))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_student))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let staff = Router::new()
        .route("/", get(get_applications))
        .route("/{id}", patch(review_application))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_staff))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    authenticated
        .merge(student)
        .merge(staff)
        .layer(DefaultBodyLimit::max(state.upload_config.body_limit()))
}
