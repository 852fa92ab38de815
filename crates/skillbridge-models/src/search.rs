//! Back-office search across applications, students and courses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillbridge_core::PageMeta;
use skillbridge_core::serde::{deserialize_optional_i64, deserialize_optional_uuid};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::applications::ApplicationStatus;
use crate::courses::{CourseLevel, CourseStatus};
use crate::users::UserStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    All,
    Applications,
    Students,
    Courses,
}

impl SearchType {
    pub fn includes_applications(self) -> bool {
        matches!(self, SearchType::All | SearchType::Applications)
    }

    pub fn includes_students(self) -> bool {
        matches!(self, SearchType::All | SearchType::Students)
    }

    pub fn includes_courses(self) -> bool {
        matches!(self, SearchType::All | SearchType::Courses)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default, rename = "type")]
    pub kind: SearchType,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuickSearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApplicationSearchQuery {
    #[serde(default)]
    pub query: String,
    pub status: Option<ApplicationStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentSearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseSearchQuery {
    #[serde(default)]
    pub query: String,
    pub status: Option<CourseStatus>,
    /// Category id
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub category: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationHit {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub payment_reference: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub course_id: Uuid,
    pub course_title: String,
    pub category_name: String,
    pub student_id: Uuid,
    pub student_name: String,
    pub student_email: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentHit {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    pub phone: Option<String>,
    pub application_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseHit {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub status: CourseStatus,
    pub level: CourseLevel,
    pub price_original: f64,
    pub price_discounted: f64,
    pub category_id: Uuid,
    pub category_name: String,
    pub instructor_id: Uuid,
    pub instructor_name: String,
    pub instructor_email: String,
    pub application_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub applications: Vec<ApplicationHit>,
    pub students: Vec<StudentHit>,
    pub courses: Vec<CourseHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SearchSummary {
    pub applications: usize,
    pub students: usize,
    pub courses: usize,
    pub total: usize,
}

impl SearchSummary {
    pub fn of(results: &SearchResults) -> Self {
        let (applications, students, courses) = (
            results.applications.len(),
            results.students.len(),
            results.courses.len(),
        );
        Self {
            applications,
            students,
            courses,
            total: applications + students + courses,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    #[serde(rename = "type")]
    pub kind: SearchType,
    pub results: SearchResults,
    pub summary: SearchSummary,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuickSearchResponse {
    pub success: bool,
    pub query: String,
    pub results: SearchResults,
    pub summary: SearchSummary,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplicationSearchResponse {
    pub success: bool,
    pub applications: Vec<ApplicationHit>,
    pub pagination: PageMeta,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentSearchResponse {
    pub success: bool,
    pub students: Vec<StudentHit>,
    pub pagination: PageMeta,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseSearchResponse {
    pub success: bool,
    pub courses: Vec<CourseHit>,
    pub pagination: PageMeta,
}

/// `%term%` pattern for ILIKE with `%`, `_` and `\` escaped.
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
