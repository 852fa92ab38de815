use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::middleware::{auth::require_auth, role::require_admin};
use crate::state::AppState;

use super::controller::{
    delete_contact_message, export_contact_messages, get_contact_message, get_contact_messages,
    submit_contact_message, update_contact_status,
};

pub fn init_contact_router(state: &AppState) -> Router<AppState> {
    let public = Router::new().route("/", post(submit_contact_message));

    let admin = Router::new()
        .route("/", get(get_contact_messages))
        .route("/export/csv", get(export_contact_messages))
        .route(
            "/{id}",
            get(get_contact_message).delete(delete_contact_message),
        )
        .route("/{id}/status", patch(update_contact_status))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public.merge(admin)
}
