//! Courses and their owned curriculum.
//!
//! A course owns three child collections: modules (each owning lessons),
//! learning outcomes and prerequisites. Module and lesson positions are
//! exposed as `order` and stored in the `sort_order` column.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillbridge_core::serde::deserialize_optional_string;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::users::{RecordStatus, UserSummary};

/// Lesson duration used when none is supplied.
pub const DEFAULT_LESSON_DURATION: &str = "30 min";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "course_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseStatus {
    #[default]
    Draft,
    Published,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "course_level", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
    AllLevels,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub detailed_description: String,
    pub image_url: Option<String>,
    pub price_original: f64,
    pub price_discounted: f64,
    pub status: CourseStatus,
    pub level: CourseLevel,
    pub duration: String,
    pub category_id: Uuid,
    pub instructor_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub duration: String,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    #[sqlx(skip)]
    pub lessons: Vec<CourseLesson>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseLesson {
    pub id: Uuid,
    pub module_id: Uuid,
    pub title: String,
    pub duration: String,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A learning outcome or prerequisite line.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseTextItem {
    pub id: Uuid,
    pub course_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A course with its category, instructor and full curriculum.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: Course,
    pub category: CategorySummary,
    pub instructor: UserSummary,
    pub modules: Vec<CourseModule>,
    pub learning_outcomes: Vec<CourseTextItem>,
    pub prerequisites: Vec<CourseTextItem>,
}

/// Published course card for the public landing page.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LandingCourse {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub image_url: Option<String>,
    pub price_original: f64,
    pub price_discounted: f64,
    pub level: CourseLevel,
    pub duration: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub instructor_name: String,
    pub application_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LandingSort {
    #[default]
    Newest,
    Popular,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LandingQuery {
    /// Category id or name (case-insensitive)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    /// `newest` (default) or `popular`
    pub sort: Option<LandingSort>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseDto {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: String,
    #[validate(length(
        min = 10,
        max = 500,
        message = "Short description must be between 10 and 500 characters"
    ))]
    pub short_description: String,
    #[validate(length(
        min = 20,
        max = 5000,
        message = "Detailed description must be between 20 and 5000 characters"
    ))]
    pub detailed_description: String,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price_original: f64,
    #[validate(range(min = 0.0, message = "Discounted price cannot be negative"))]
    pub price_discounted: f64,
    pub status: Option<CourseStatus>,
    pub level: CourseLevel,
    #[validate(length(min = 1, max = 50, message = "Duration is required"))]
    pub duration: String,
    pub category_id: Uuid,
    pub instructor_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseDto {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: Option<String>,
    #[validate(length(
        min = 10,
        max = 500,
        message = "Short description must be between 10 and 500 characters"
    ))]
    pub short_description: Option<String>,
    #[validate(length(
        min = 20,
        max = 5000,
        message = "Detailed description must be between 20 and 5000 characters"
    ))]
    pub detailed_description: Option<String>,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price_original: Option<f64>,
    #[validate(range(min = 0.0, message = "Discounted price cannot be negative"))]
    pub price_discounted: Option<f64>,
    pub status: Option<CourseStatus>,
    pub level: Option<CourseLevel>,
    #[validate(length(min = 1, max = 50, message = "Duration is required"))]
    pub duration: Option<String>,
    pub category_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LessonInput {
    #[serde(default)]
    pub title: String,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ModuleInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub lessons: Vec<LessonInput>,
}

/// Course scalars plus the complete curriculum, written in one transaction.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveCourseDto {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: String,
    #[validate(length(
        min = 10,
        max = 500,
        message = "Short description must be between 10 and 500 characters"
    ))]
    pub short_description: String,
    #[validate(length(
        min = 20,
        max = 5000,
        message = "Detailed description must be between 20 and 5000 characters"
    ))]
    pub detailed_description: String,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price_original: f64,
    #[validate(range(min = 0.0, message = "Discounted price cannot be negative"))]
    pub price_discounted: f64,
    pub status: Option<CourseStatus>,
    pub level: CourseLevel,
    #[validate(length(min = 1, max = 50, message = "Duration is required"))]
    pub duration: String,
    pub category_id: Uuid,
    pub instructor_id: Uuid,
    #[serde(default)]
    pub learning_outcomes: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_curriculum"))]
    pub curriculum: Vec<ModuleInput>,
}

impl ComprehensiveCourseDto {
    /// Splits the payload into its scalar part and its normalized children.
    pub fn into_parts(self) -> (CreateCourseDto, CourseChildren) {
        let children = CourseChildren {
            learning_outcomes: normalize_texts(&self.learning_outcomes),
            prerequisites: normalize_texts(&self.prerequisites),
            modules: normalize_curriculum(&self.curriculum),
        };

        let scalars = CreateCourseDto {
            title: self.title,
            short_description: self.short_description,
            detailed_description: self.detailed_description,
            image_url: self.image_url,
            price_original: self.price_original,
            price_discounted: self.price_discounted,
            status: self.status,
            level: self.level,
            duration: self.duration,
            category_id: self.category_id,
            instructor_id: self.instructor_id,
        };

        (scalars, children)
    }
}

/// Rejects the first module lacking a title or duration, or lesson lacking a title.
pub fn validate_curriculum(modules: &[ModuleInput]) -> Result<(), ValidationError> {
    for (i, module) in modules.iter().enumerate() {
        if module.title.trim().is_empty() || module.duration.trim().is_empty() {
            return Err(ValidationError::new("curriculum").with_message(
                format!(
                    "Module {} is missing required fields: title and duration",
                    i + 1
                )
                .into(),
            ));
        }

        if let Some(j) = module.lessons.iter().position(|l| l.title.trim().is_empty()) {
            return Err(ValidationError::new("curriculum").with_message(
                format!("Lesson {} in module {} is missing title", j + 1, i + 1).into(),
            ));
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLesson {
    pub title: String,
    pub duration: String,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewModule {
    pub title: String,
    pub duration: String,
    pub order: i32,
    pub lessons: Vec<NewLesson>,
}

/// Normalized child rows ready for insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChildren {
    pub learning_outcomes: Vec<String>,
    pub prerequisites: Vec<String>,
    pub modules: Vec<NewModule>,
}

/// Trims every entry and drops the blank ones.
pub fn normalize_texts(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Assigns 1-based positions in input order and fills default lesson durations.
pub fn normalize_curriculum(modules: &[ModuleInput]) -> Vec<NewModule> {
    modules
        .iter()
        .zip(1..)
        .map(|(module, order)| NewModule {
            title: module.title.trim().to_string(),
            duration: module.duration.trim().to_string(),
            order,
            lessons: module
                .lessons
                .iter()
                .filter(|lesson| !lesson.title.trim().is_empty())
                .zip(1..)
                .map(|(lesson, order)| NewLesson {
                    title: lesson.title.trim().to_string(),
                    duration: lesson
                        .duration
                        .as_deref()
                        .map(str::trim)
                        .filter(|d| !d.is_empty())
                        .unwrap_or(DEFAULT_LESSON_DURATION)
                        .to_string(),
                    order,
                })
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateModuleDto {
    pub course_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "Module title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 50, message = "Module duration is required"))]
    pub duration: String,
    #[validate(range(min = 1, message = "Order must be at least 1"))]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateModuleDto {
    #[validate(length(min = 1, max = 200, message = "Module title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Module duration is required"))]
    pub duration: Option<String>,
    #[validate(range(min = 1, message = "Order must be at least 1"))]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonDto {
    pub module_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "Lesson title is required"))]
    pub title: String,
    pub duration: Option<String>,
    #[validate(range(min = 1, message = "Order must be at least 1"))]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLessonDto {
    #[validate(length(min = 1, max = 200, message = "Lesson title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Lesson duration is required"))]
    pub duration: Option<String>,
    #[validate(range(min = 1, message = "Order must be at least 1"))]
    pub order: Option<i32>,
}

/// Body for creating a learning outcome or prerequisite.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTextItemDto {
    pub course_id: Uuid,
    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTextItemDto {
    #[validate(custom(function = "validate_not_blank"))]
    pub text: String,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Text cannot be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(title: &str, duration: &str, lessons: &[&str]) -> ModuleInput {
        ModuleInput {
            title: title.to_string(),
            duration: duration.to_string(),
            lessons: lessons
                .iter()
                .map(|t| LessonInput {
                    title: t.to_string(),
                    duration: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_curriculum_orders_are_contiguous() {
        let input = vec![
            module(" Intro ", "1h", &["L1", "L2"]),
            module("Deep dive", " 3h ", &["L1", "L2", "L3"]),
        ];

        let modules = normalize_curriculum(&input);

        assert_eq!(modules.iter().map(|m| m.order).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(modules[0].title, "Intro");
        assert_eq!(modules[1].duration, "3h");
        assert_eq!(
            modules[1].lessons.iter().map(|l| l.order).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_missing_lesson_duration_defaults() {
        let input = vec![ModuleInput {
            title: "Intro".to_string(),
            duration: "1h".to_string(),
            lessons: vec![
                LessonInput {
                    title: "L1".to_string(),
                    duration: None,
                },
                LessonInput {
                    title: "L2".to_string(),
                    duration: Some("  ".to_string()),
                },
                LessonInput {
                    title: "L3".to_string(),
                    duration: Some("45 min".to_string()),
                },
            ],
        }];

        let lessons = &normalize_curriculum(&input)[0].lessons;
        assert_eq!(lessons[0].duration, DEFAULT_LESSON_DURATION);
        assert_eq!(lessons[1].duration, DEFAULT_LESSON_DURATION);
        assert_eq!(lessons[2].duration, "45 min");
    }

    #[test]
    fn test_normalize_texts_drops_blanks() {
        let items = vec![
            "  Build APIs ".to_string(),
            "   ".to_string(),
            String::new(),
            "Ship".to_string(),
        ];
        assert_eq!(normalize_texts(&items), vec!["Build APIs", "Ship"]);
    }

    #[test]
    fn test_validate_curriculum_reports_module() {
        let input = vec![module("Intro", "1h", &[]), module("  ", "2h", &[])];
        let err = validate_curriculum(&input).unwrap_err();
        assert_eq!(
            err.message.unwrap(),
            "Module 2 is missing required fields: title and duration"
        );
    }

    #[test]
    fn test_validate_curriculum_reports_lesson() {
        let input = vec![module("Intro", "1h", &["L1", " "])];
        let err = validate_curriculum(&input).unwrap_err();
        assert_eq!(err.message.unwrap(), "Lesson 2 in module 1 is missing title");
    }

    #[test]
    fn test_empty_curriculum_is_valid() {
        assert!(validate_curriculum(&[]).is_ok());
        assert!(normalize_curriculum(&[]).is_empty());
    }

    #[test]
    fn test_comprehensive_payload_deserializes_defaults() {
        let payload: ComprehensiveCourseDto = serde_json::from_value(serde_json::json!({
            "title": "Rust for Backend Engineers",
            "shortDescription": "Build web services in Rust",
            "detailedDescription": "A practical course covering axum, sqlx and tokio.",
            "priceOriginal": 100.0,
            "priceDiscounted": 80.0,
            "level": "ALL_LEVELS",
            "duration": "6 weeks",
            "categoryId": Uuid::new_v4(),
            "instructorId": Uuid::new_v4(),
            "curriculum": [{ "title": "Intro", "duration": "1h", "lessons": [{ "title": "L1" }] }]
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        let (scalars, children) = payload.into_parts();
        assert_eq!(scalars.level, CourseLevel::AllLevels);
        assert!(children.learning_outcomes.is_empty());
        assert_eq!(children.modules[0].lessons[0].order, 1);
    }

    #[test]
    fn test_comprehensive_payload_rejects_untitled_module() {
        let payload: ComprehensiveCourseDto = serde_json::from_value(serde_json::json!({
            "title": "Rust for Backend Engineers",
            "shortDescription": "Build web services in Rust",
            "detailedDescription": "A practical course covering axum, sqlx and tokio.",
            "priceOriginal": 100.0,
            "priceDiscounted": 80.0,
            "level": "BEGINNER",
            "duration": "6 weeks",
            "categoryId": Uuid::new_v4(),
            "instructorId": Uuid::new_v4(),
            "curriculum": [{ "title": "", "duration": "1h", "lessons": [] }]
        }))
        .unwrap();

        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("curriculum"));
    }
}
