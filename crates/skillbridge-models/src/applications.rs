//! Student course applications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillbridge_core::serde::{deserialize_optional_string, deserialize_optional_uuid};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "application_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Telebirr,
    Cbe,
    Amole,
    Other,
}

/// An application row joined with its course title and student name.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub full_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub gender: String,
    pub university: Option<String>,
    pub email: String,
    pub phone: String,
    pub telegram_handle: Option<String>,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub payment_reference: String,
    pub marketing_source: Option<String>,
    pub status: ApplicationStatus,
    pub admin_notes: Option<String>,
    pub receipt_verified: bool,
    pub receipt_url: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub course_title: String,
    pub student_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationDto {
    pub course_id: Uuid,
    pub payment_method: PaymentMethod,
    #[validate(length(min = 3, message = "Payment reference must be at least 3 characters"))]
    pub payment_reference: String,
    pub marketing_source: Option<String>,
    #[validate(length(min = 3, message = "Full name must be at least 3 characters"))]
    pub full_name: String,
    /// RFC 3339 timestamp
    pub date_of_birth: DateTime<Utc>,
    #[validate(length(min = 1, message = "Gender is required"))]
    pub gender: String,
    pub university: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    pub telegram_handle: Option<String>,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

impl CreateApplicationDto {
    /// Builds the DTO from multipart text parts.
    ///
    /// Parts share the JSON field names; empty optional parts are dropped so
    /// they deserialize as `None`.
    pub fn from_form_fields(
        fields: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, serde_json::Error> {
        let map: serde_json::Map<String, serde_json::Value> = fields
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(name, value)| (name, serde_json::Value::String(value)))
            .collect();

        serde_json::from_value(serde_json::Value::Object(map))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationDto {
    pub status: Option<ApplicationStatus>,
    #[validate(length(max = 5000, message = "Admin notes too long"))]
    pub admin_notes: Option<String>,
    pub receipt_verified: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    pub status: Option<ApplicationStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_uuid")]
    pub course_id: Option<Uuid>,
    /// Matches full name, email or payment reference
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReceiptUrlResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApplicationWithReceiptResponse {
    pub success: bool,
    pub message: String,
    pub application: Application,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_form_fields() {
        let course_id = Uuid::new_v4();
        let fields = vec![
            ("courseId".to_string(), course_id.to_string()),
            ("paymentMethod".to_string(), "TELEBIRR".to_string()),
            ("paymentReference".to_string(), "TX-12345".to_string()),
            ("fullName".to_string(), "Sara Tesfaye".to_string()),
            ("dateOfBirth".to_string(), "2001-04-12T00:00:00Z".to_string()),
            ("gender".to_string(), "female".to_string()),
            ("email".to_string(), "sara@example.com".to_string()),
            ("phone".to_string(), "+251911000000".to_string()),
            ("address".to_string(), "Addis Ababa".to_string()),
            ("university".to_string(), "".to_string()),
        ];

        let dto = CreateApplicationDto::from_form_fields(fields).unwrap();
        assert_eq!(dto.course_id, course_id);
        assert_eq!(dto.payment_method, PaymentMethod::Telebirr);
        assert!(dto.university.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_from_form_fields_missing_required() {
        let fields = vec![("courseId".to_string(), Uuid::new_v4().to_string())];
        assert!(CreateApplicationDto::from_form_fields(fields).is_err());
    }
}
