//! Users, roles and role-specific profiles.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Closed set of platform roles, backed by the `user_role` PostgreSQL enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Support,
    Instructor,
    Student,
}

impl UserRole {
    /// Roles that may operate the back office.
    pub const ADMIN_TIER: [UserRole; 3] = [UserRole::SuperAdmin, UserRole::Admin, UserRole::Support];

    /// Admin tier plus instructors.
    pub const STAFF: [UserRole; 4] = [
        UserRole::SuperAdmin,
        UserRole::Admin,
        UserRole::Support,
        UserRole::Instructor,
    ];

    pub fn is_admin_tier(self) -> bool {
        Self::ADMIN_TIER.contains(&self)
    }

    pub fn is_staff(self) -> bool {
        Self::STAFF.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "SUPER_ADMIN",
            UserRole::Admin => "ADMIN",
            UserRole::Support => "SUPPORT",
            UserRole::Instructor => "INSTRUCTOR",
            UserRole::Student => "STUDENT",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

/// Two-state status shared by categories and instructor profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "record_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user row together with its bcrypt hash. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

/// Compact user reference embedded in other resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub years_of_experience: i32,
    pub bio: Option<String>,
    pub status: RecordStatus,
    pub rating: f64,
    pub students: i32,
    /// Expertise names, loaded separately from `instructor_expertise`.
    #[sqlx(skip)]
    pub expertise: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// The role-specific profile attached to a user, tagged by `kind`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    Admin(AdminProfile),
    Instructor(InstructorProfile),
    Student(StudentProfile),
}

/// User representation returned by login and `/auth/me`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserWithProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub profile: Option<Profile>,
}

impl UserWithProfile {
    pub fn new(user: User, profile: Option<Profile>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            status: user.status,
            profile,
        }
    }
}

/// Trims and lowercases an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_tiers() {
        assert!(UserRole::SuperAdmin.is_admin_tier());
        assert!(UserRole::Support.is_admin_tier());
        assert!(!UserRole::Instructor.is_admin_tier());
        assert!(UserRole::Instructor.is_staff());
        assert!(!UserRole::Student.is_staff());
    }

    #[test]
    fn test_role_serializes_screaming_snake() {
        let json = serde_json::to_string(&UserRole::SuperAdmin).unwrap();
        assert_eq!(json, r#""SUPER_ADMIN""#);

        let role: UserRole = serde_json::from_str(r#""INSTRUCTOR""#).unwrap();
        assert_eq!(role, UserRole::Instructor);
        assert_eq!(role.to_string(), "INSTRUCTOR");
    }

    #[test]
    fn test_profile_is_tagged_by_kind() {
        let profile = Profile::Student(StudentProfile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            phone: Some("+251900000000".to_string()),
            date_of_birth: None,
            created_at: Utc::now(),
        });

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["kind"], "student");
        assert_eq!(json["phone"], "+251900000000");
        assert!(json.get("userId").is_some());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane.Doe@Example.COM "), "jane.doe@example.com");
    }
}
