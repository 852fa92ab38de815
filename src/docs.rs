//! OpenAPI document served at `/api-docs/openapi.json`.

use skillbridge_core::PageMeta;
use skillbridge_core::errors::{ErrorResponse, ValidationIssue};
use skillbridge_models::{
    AdminProfile, InstructorProfile, Profile, StudentProfile, User, UserRole, UserStatus,
    UserSummary, UserWithProfile,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::register_student,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::login_student,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::get_me,
        crate::modules::auth::controller::logout,
        crate::modules::courses::controller::get_landing_courses,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::create_comprehensive_course,
        crate::modules::courses::controller::update_comprehensive_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::get_course_modules,
        crate::modules::courses::controller::create_module,
        crate::modules::courses::controller::update_module,
        crate::modules::courses::controller::delete_module,
        crate::modules::courses::controller::get_module_lessons,
        crate::modules::courses::controller::create_lesson,
        crate::modules::courses::controller::update_lesson,
        crate::modules::courses::controller::delete_lesson,
        crate::modules::courses::controller::get_learning_outcomes,
        crate::modules::courses::controller::create_learning_outcome,
        crate::modules::courses::controller::update_learning_outcome,
        crate::modules::courses::controller::delete_learning_outcome,
        crate::modules::courses::controller::get_prerequisites,
        crate::modules::courses::controller::create_prerequisite,
        crate::modules::courses::controller::update_prerequisite,
        crate::modules::courses::controller::delete_prerequisite,
        crate::modules::categories::controller::get_navbar_categories,
        crate::modules::categories::controller::get_categories,
        crate::modules::categories::controller::get_category,
        crate::modules::categories::controller::create_category,
        crate::modules::categories::controller::update_category,
        crate::modules::categories::controller::delete_category,
        crate::modules::instructors::controller::get_instructors,
        crate::modules::instructors::controller::get_instructor,
        crate::modules::instructors::controller::create_instructor,
        crate::modules::instructors::controller::update_instructor,
        crate::modules::instructors::controller::delete_instructor,
        crate::modules::admins::controller::get_admins,
        crate::modules::admins::controller::create_admin,
        crate::modules::admins::controller::update_admin,
        crate::modules::admins::controller::delete_admin,
        crate::modules::applications::controller::get_applications,
        crate::modules::applications::controller::get_my_applications,
        crate::modules::applications::controller::get_application,
        crate::modules::applications::controller::create_application,
        crate::modules::applications::controller::create_application_with_receipt,
        crate::modules::applications::controller::review_application,
        crate::modules::applications::controller::upload_receipt,
        crate::modules::applications::controller::get_receipt,
        crate::modules::dashboard::controller::get_dashboard_stats,
        crate::modules::dashboard::controller::get_dashboard_charts,
        crate::modules::notifications::controller::get_notifications,
        crate::modules::notifications::controller::get_unread_count,
        crate::modules::notifications::controller::mark_as_read,
        crate::modules::notifications::controller::mark_all_as_read,
        crate::modules::notifications::controller::delete_notification,
        crate::modules::search::controller::global_search,
        crate::modules::search::controller::quick_search,
        crate::modules::search::controller::search_applications,
        crate::modules::search::controller::search_students,
        crate::modules::search::controller::search_courses,
        crate::modules::contact::controller::submit_contact_message,
        crate::modules::contact::controller::get_contact_messages,
        crate::modules::contact::controller::get_contact_message,
        crate::modules::contact::controller::update_contact_status,
        crate::modules::contact::controller::delete_contact_message,
        crate::modules::contact::controller::export_contact_messages,
        crate::modules::settings::controller::get_general_settings,
        crate::modules::settings::controller::update_general_settings,
        crate::modules::settings::controller::reset_general_settings,
        crate::modules::settings::controller::get_email_settings,
        crate::modules::settings::controller::update_email_settings,
        crate::modules::settings::controller::reset_email_settings,
        crate::modules::settings::controller::get_security_settings,
        crate::modules::settings::controller::update_security_settings,
        crate::modules::settings::controller::reset_security_settings,
        crate::modules::settings::controller::get_social_settings,
        crate::modules::settings::controller::update_social_settings,
        crate::modules::settings::controller::reset_social_settings,
        crate::modules::settings::controller::get_advanced_settings,
        crate::modules::settings::controller::update_advanced_settings,
        crate::modules::settings::controller::reset_advanced_settings,
    ),
    components(
        schemas(
            ErrorResponse,
            ValidationIssue,
            PageMeta,
            User,
            UserRole,
            UserStatus,
            UserSummary,
            UserWithProfile,
            Profile,
            AdminProfile,
            InstructorProfile,
            StudentProfile,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and token refresh"),
        (name = "Courses", description = "Courses and their curriculum"),
        (name = "Categories", description = "Course categories"),
        (name = "Instructors", description = "Instructor profiles and expertise"),
        (name = "Admins", description = "Back-office accounts"),
        (name = "Applications", description = "Student enrollment applications and payment receipts"),
        (name = "Settings", description = "Platform settings"),
        (name = "Dashboard", description = "Back-office statistics"),
        (name = "Notifications", description = "Back-office notifications"),
        (name = "Search", description = "Search across applications, students and courses"),
        (name = "Contact", description = "Public contact form"),
    ),
    info(
        title = "SkillBridge API",
        version = "0.1.0",
        description = "REST API for the SkillBridge e-learning platform",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
