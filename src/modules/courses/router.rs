use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::{auth::require_auth, role::require_staff};
use crate::state::AppState;

use super::controller::{
    create_comprehensive_course, create_course, create_learning_outcome, create_lesson,
    create_module, create_prerequisite, delete_course, delete_learning_outcome, delete_lesson,
    delete_module, delete_prerequisite, get_course, get_course_modules, get_courses,
    get_landing_courses, get_learning_outcomes, get_module_lessons, get_prerequisites,
    update_comprehensive_course, update_course, update_learning_outcome, update_lesson,
    update_module, update_prerequisite,
};

pub fn init_courses_router(state: &AppState) -> Router<AppState> {
    let public = Router::new().route("/landing", get(get_landing_courses));

    let authenticated = Router::new()
        .route("/", get(get_courses))
        .route("/{id}", get(get_course))
        .route("/{id}/modules", get(get_course_modules))
        .route("/{id}/learning-outcomes", get(get_learning_outcomes))
        .route("/{id}/prerequisites", get(get_prerequisites))
        .route("/modules/{id}/lessons", get(get_module_lessons))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let staff = Router::new()
        .route("/", post(create_course))
        .route("/{id}", put(update_course).delete(delete_course))
        .route("/comprehensive", post(create_comprehensive_course))
        .route("/{id}/comprehensive", put(update_comprehensive_course))
        .route("/modules", post(create_module))
        .route("/modules/{id}", put(update_module).delete(delete_module))
        .route("/lessons", post(create_lesson))
        .route("/lessons/{id}", put(update_lesson).delete(delete_lesson))
        .route("/learning-outcomes", post(create_learning_outcome))
        .route(
            "/learning-outcomes/{id}",
            put(update_learning_outcome).delete(delete_learning_outcome),
        )
        .route("/prerequisites", post(create_prerequisite))
        .route(
            "/prerequisites/{id}",
            put(update_prerequisite).delete(delete_prerequisite),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_staff))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public.merge(authenticated).merge(staff)
}
