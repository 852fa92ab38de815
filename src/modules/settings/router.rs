use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    get_advanced_settings, get_email_settings, get_general_settings, get_security_settings,
    get_social_settings, reset_advanced_settings, reset_email_settings, reset_general_settings,
    reset_security_settings, reset_social_settings, update_advanced_settings,
    update_email_settings, update_general_settings, update_security_settings,
    update_social_settings,
};

/// Admin tier only; the gate is applied by the caller.
///
/// `/` and `/reset` act on the general section.
pub fn init_settings_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_general_settings).put(update_general_settings))
        .route("/reset", post(reset_general_settings))
        .route(
            "/general",
            get(get_general_settings).put(update_general_settings),
        )
        .route("/general/reset", post(reset_general_settings))
        .route("/email", get(get_email_settings).put(update_email_settings))
        .route("/email/reset", post(reset_email_settings))
        .route(
            "/security",
            get(get_security_settings).put(update_security_settings),
        )
        .route("/security/reset", post(reset_security_settings))
        .route("/social", get(get_social_settings).put(update_social_settings))
        .route("/social/reset", post(reset_social_settings))
        .route(
            "/advanced",
            get(get_advanced_settings).put(update_advanced_settings),
        )
        .route("/advanced/reset", post(reset_advanced_settings))
}
