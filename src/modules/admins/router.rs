use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{create_admin, delete_admin, get_admins, update_admin};

/// Admin tier only; the gate is applied by the caller.
pub fn init_admins_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_admins).post(create_admin))
        .route("/{id}", put(update_admin).delete(delete_admin))
}
