//! Back-office (admin-tier) accounts.

use serde::{Deserialize, Serialize};
use skillbridge_core::serde::deserialize_optional_string;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::auth::validate_admin_role;
use crate::users::{AdminProfile, User, UserRole, UserStatus};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminWithProfile {
    #[serde(flatten)]
    pub user: User,
    pub admin_profile: Option<AdminProfile>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminMutationResponse {
    pub message: String,
    pub user: AdminWithProfile,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminQuery {
    /// Case-insensitive match on name or email
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAdminDto {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(custom(function = "validate_admin_role"))]
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAdminDto {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    #[validate(custom(function = "validate_admin_role"))]
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}
