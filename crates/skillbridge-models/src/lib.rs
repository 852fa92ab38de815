//! # SkillBridge Models
//!
//! Domain entities and request/response DTOs for the SkillBridge API.
//!
//! Entities derive `sqlx::FromRow` and serialize as camelCase JSON. Request
//! bodies derive `validator::Validate`; the HTTP layer rejects invalid input
//! before any service code runs.
//!
//! - [`users`]: users, roles and role-specific profiles
//! - [`auth`]: registration, login and refresh bodies
//! - [`courses`]: courses and their curriculum
//! - [`categories`], [`instructors`], [`admins`], [`applications`]
//! - [`settings`]: per-section platform settings documents
//! - [`notifications`], [`dashboard`], [`search`], [`contact`]

pub mod admins;
pub mod applications;
pub mod auth;
pub mod categories;
pub mod common;
pub mod contact;
pub mod courses;
pub mod dashboard;
pub mod instructors;
pub mod notifications;
pub mod search;
pub mod settings;
pub mod users;

pub use common::{MessageResponse, SuccessResponse};
pub use users::{
    AdminProfile, InstructorProfile, Profile, RecordStatus, StudentProfile, User, UserCredentials,
    UserRole, UserStatus, UserSummary, UserWithProfile, normalize_email,
};
