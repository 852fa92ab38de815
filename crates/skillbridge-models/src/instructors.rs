//! Instructor profiles and their expertise tags.

use serde::{Deserialize, Serialize};
use skillbridge_core::serde::deserialize_optional_string;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::users::{InstructorProfile, RecordStatus, UserSummary};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InstructorWithUser {
    #[serde(flatten)]
    pub profile: InstructorProfile,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InstructorQuery {
    pub status: Option<RecordStatus>,
    /// Exact expertise name
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub expertise: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstructorDto {
    pub user_id: Uuid,
    #[validate(length(max = 30, message = "Phone number too long"))]
    pub phone: Option<String>,
    #[validate(range(min = 0, max = 80, message = "Years of experience must be between 0 and 80"))]
    pub years_of_experience: Option<i32>,
    #[validate(length(max = 5000, message = "Bio too long"))]
    pub bio: Option<String>,
    pub status: Option<RecordStatus>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    #[validate(range(min = 0, message = "Students cannot be negative"))]
    pub students: Option<i32>,
    pub expertise: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstructorDto {
    #[validate(length(max = 30, message = "Phone number too long"))]
    pub phone: Option<String>,
    #[validate(range(min = 0, max = 80, message = "Years of experience must be between 0 and 80"))]
    pub years_of_experience: Option<i32>,
    #[validate(length(max = 5000, message = "Bio too long"))]
    pub bio: Option<String>,
    pub status: Option<RecordStatus>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    #[validate(range(min = 0, message = "Students cannot be negative"))]
    pub students: Option<i32>,
    /// When present, replaces the instructor's expertise links.
    pub expertise: Option<Vec<String>>,
}

/// Trims, drops blanks and de-duplicates expertise names, keeping first-seen order.
pub fn normalize_expertise(names: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty() && seen.insert(n.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_expertise() {
        let names = vec![
            " Rust ".to_string(),
            "Go".to_string(),
            "Rust".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(normalize_expertise(&names), vec!["Rust", "Go"]);
    }
}
