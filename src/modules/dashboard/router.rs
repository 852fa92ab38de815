use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_dashboard_charts, get_dashboard_stats};

/// Admin tier only; the gate is applied by the caller.
pub fn init_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_dashboard_stats))
        .route("/charts", get(get_dashboard_charts))
}
