use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::{auth::require_auth, role::require_admin};
use crate::state::AppState;

use super::controller::{
    create_category, delete_category, get_categories, get_category, get_navbar_categories,
    update_category,
};

pub fn init_categories_router(state: &AppState) -> Router<AppState> {
    let public = Router::new().route("/navbar", get(get_navbar_categories));

    let authenticated = Router::new()
        .route("/", get(get_categories))
        .route("/{id}", get(get_category))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let admin = Router::new()
        .route("/", post(create_category))
        .route("/{id}", put(update_category).delete(delete_category))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public.merge(authenticated).merge(admin)
}
