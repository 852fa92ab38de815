use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use skillbridge_auth::{Claims, verify_access_token};
use skillbridge_core::AppError;
use skillbridge_models::UserRole;
use uuid::Uuid;

use crate::state::AppState;

/// The verified identity behind an access token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.0.sub
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn role(&self) -> UserRole {
        self.0.role
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.0.role)
    }

    pub fn is_staff(&self) -> bool {
        self.0.role.is_staff()
    }

    /// Ownership check: staff always pass, anyone else only for their own id.
    pub fn can_access_owned_by(&self, owner_id: Uuid) -> bool {
        self.is_staff() || self.user_id() == owner_id
    }

    async fn from_header(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("No token provided"))?;

        let claims = verify_access_token(bearer.token(), &state.jwt_config)?;
        Ok(AuthUser(claims))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        Self::from_header(parts, state).await
    }
}

/// Rejects the request with 401 unless it carries a valid access token.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();
    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    parts.extensions.insert(auth_user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Returns 403 unless the caller holds one of `roles`.
pub fn check_any_role(auth_user: &AuthUser, roles: &[UserRole]) -> Result<(), AppError> {
    if auth_user.has_any_role(roles) {
        Ok(())
    } else {
        Err(AppError::forbidden("Unauthorized access"))
    }
}
