use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::{auth::require_auth, role::require_admin};
use crate::state::AppState;

use super::controller::{
    create_instructor, delete_instructor, get_instructor, get_instructors, update_instructor,
};

pub fn init_instructors_router(state: &AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/", get(get_instructors))
        .route("/{id}", get(get_instructor))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let admin = Router::new()
        .route("/", post(create_instructor))
        .route("/{id}", put(update_instructor).delete(delete_instructor))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    authenticated.merge(admin)
}
