//! Authentication request and response bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::users::{UserRole, UserSummary, UserWithProfile};

/// Rejects roles outside the admin tier.
pub fn validate_admin_role(role: &UserRole) -> Result<(), ValidationError> {
    if role.is_admin_tier() {
        Ok(())
    } else {
        Err(ValidationError::new("admin_role")
            .with_message("Role must be one of SUPER_ADMIN, ADMIN, SUPPORT".into()))
    }
}

/// Public registration may only create plain admins.
pub fn validate_register_role(role: &UserRole) -> Result<(), ValidationError> {
    if *role == UserRole::Admin {
        Ok(())
    } else {
        Err(ValidationError::new("register_role").with_message("Role must be ADMIN".into()))
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    #[schema(example = "Abebe Kebede")]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    #[schema(example = "admin@skillbridge.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Only ADMIN is accepted (default: ADMIN)
    #[validate(custom(function = "validate_register_role"))]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegisterRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserWithProfile,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_non_admin_role() {
        let request = RegisterRequest {
            name: "Abebe".to_string(),
            email: "abebe@example.com".to_string(),
            password: "secret123".to_string(),
            role: Some(UserRole::Student),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }

    #[test]
    fn test_register_rejects_elevated_roles() {
        for role in [UserRole::SuperAdmin, UserRole::Support] {
            let request = RegisterRequest {
                name: "Abebe".to_string(),
                email: "abebe@example.com".to_string(),
                password: "secret123".to_string(),
                role: Some(role),
            };
            let errors = request.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("role"));
        }
    }

    #[test]
    fn test_register_accepts_missing_role() {
        let request = RegisterRequest {
            name: "Abebe".to_string(),
            email: "abebe@example.com".to_string(),
            password: "secret123".to_string(),
            role: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_requires_six_char_password() {
        let request = LoginRequest {
            email: "a@b.com".to_string(),
            password: "123".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
