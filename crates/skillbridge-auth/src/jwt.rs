//! Token creation and verification.
//!
//! Tokens are HS256-signed with `JWT_SECRET`. Access and refresh tokens share
//! the [`Claims`] shape and differ in `kind` and lifetime; each verifier
//! rejects a token of the other kind.
//!
//! ```ignore
//! let pair = create_token_pair(user_id, "user@example.com", UserRole::Admin, &config)?;
//! let claims = verify_access_token(&pair.access_token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use skillbridge_config::JwtConfig;
use skillbridge_core::AppError;
use skillbridge_models::UserRole;
use uuid::Uuid;

use crate::claims::{Claims, TokenKind};

pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn create_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    kind: TokenKind,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let ttl = match kind {
        TokenKind::Access => jwt_config.access_token_expiry,
        TokenKind::Refresh => jwt_config.refresh_token_expiry,
    };

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role,
        kind,
        iat: now,
        exp: now + ttl.max(0) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {e}")))
}

fn verify_kind(token: &str, kind: TokenKind, jwt_config: &JwtConfig) -> Option<Claims> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .ok()
    .map(|data| data.claims)
    .filter(|claims| claims.kind == kind)
}

pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_token(user_id, email, role, TokenKind::Access, jwt_config)
}

pub fn create_refresh_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_token(user_id, email, role, TokenKind::Refresh, jwt_config)
}

pub fn create_token_pair(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<TokenPair, AppError> {
    Ok(TokenPair {
        access_token: create_access_token(user_id, email, role, jwt_config)?,
        refresh_token: create_refresh_token(user_id, email, role, jwt_config)?,
    })
}

/// Verifies signature, expiry and kind of an access token.
///
/// # Errors
///
/// 401 `Invalid or expired token` on any failure.
pub fn verify_access_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify_kind(token, TokenKind::Access, jwt_config)
        .ok_or_else(|| AppError::unauthorized("Invalid or expired token"))
}

/// # Errors
///
/// 401 `Invalid or expired refresh token` on any failure.
pub fn verify_refresh_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    verify_kind(token, TokenKind::Refresh, jwt_config)
        .ok_or_else(|| AppError::unauthorized("Invalid or expired refresh token"))
}
