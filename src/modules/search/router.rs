use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    global_search, quick_search, search_applications, search_courses, search_students,
};

/// Staff only; the gate is applied by the caller.
pub fn init_search_router() -> Router<AppState> {
    Router::new()
        .route("/", get(global_search))
        .route("/quick", get(quick_search))
        .route("/applications", get(search_applications))
        .route("/students", get(search_students))
        .route("/courses", get(search_courses))
}
