use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::state::AppState;

use super::controller::{
    delete_notification, get_notifications, get_unread_count, mark_all_as_read, mark_as_read,
};

/// Admin tier only; the gate is applied by the caller.
pub fn init_notifications_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_notifications))
        .route("/unread-count", get(get_unread_count))
        .route("/mark-all-read", put(mark_all_as_read))
        .route("/{id}/read", put(mark_as_read))
        .route("/{id}", delete(delete_notification))
}
