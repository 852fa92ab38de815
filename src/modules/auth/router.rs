use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

use super::controller::{
    get_me, login_student, login_user, logout, refresh_token, register_student, register_user,
};

pub fn init_auth_router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register_user))
        .route("/student/register", post(register_student))
        .route("/login", post(login_user))
        .route("/student/login", post(login_student))
        .route("/refresh", post(refresh_token));

    let authenticated = Router::new()
        .route("/me", get(get_me))
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    public.merge(authenticated)
}
