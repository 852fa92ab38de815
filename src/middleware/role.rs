//! Role-based authorization middleware.
//!
//! Gates are applied with `route_layer(middleware::from_fn_with_state(state, require_x))`.
//! A request that reaches a gate without a resolvable identity is refused
//! with 403, the same as a wrong role.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use skillbridge_core::AppError;
use skillbridge_models::UserRole;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state)
        .await
        .map_err(|_| AppError::forbidden("Unauthorized access"))?;

    if !auth_user.has_any_role(allowed_roles) {
        tracing::warn!(
            user.id = %auth_user.user_id(),
            user.role = %auth_user.role(),
            "Role check denied"
        );
        return Err(AppError::forbidden("Unauthorized access"));
    }

    parts.extensions.insert(auth_user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

async fn gate(state: AppState, req: Request, next: Next, roles: &[UserRole]) -> Response {
    match require_roles(State(state), req, next, roles).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// SUPER_ADMIN, ADMIN and SUPPORT.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    gate(state, req, next, &UserRole::ADMIN_TIER).await
}

/// Admin tier plus INSTRUCTOR.
pub async fn require_staff(State(state): State<AppState>, req: Request, next: Next) -> Response {
    gate(state, req, next, &UserRole::STAFF).await
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    gate(state, req, next, &[UserRole::Student]).await
}

pub async fn require_super_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    gate(state, req, next, &[UserRole::SuperAdmin]).await
}
