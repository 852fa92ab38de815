//! Public contact-form messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillbridge_core::serde::deserialize_optional_string;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contact_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
}

impl ContactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
            ContactStatus::Replied => "replied",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateContactDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "All fields are required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "All fields are required"))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "All fields are required"))]
    pub message: String,
}

impl CreateContactDto {
    /// True when any field is blank after trimming.
    pub fn has_blank_field(&self) -> bool {
        [&self.name, &self.email, &self.phone, &self.message]
            .iter()
            .any(|f| f.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateContactStatusDto {
    pub status: ContactStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContactStatusUpdated {
    pub message: String,
    pub data: ContactMessage,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactQuery {
    /// `new`, `read`, `replied` or `all`
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
}

impl ContactQuery {
    /// The status filter, with `all` meaning no filter.
    pub fn status_filter(&self) -> Result<Option<ContactStatus>, String> {
        match self.status.as_deref() {
            None | Some("all") => Ok(None),
            Some("new") => Ok(Some(ContactStatus::New)),
            Some("read") => Ok(Some(ContactStatus::Read)),
            Some("replied") => Ok(Some(ContactStatus::Replied)),
            Some(_) => Err("Invalid status. Must be one of: new, read, replied".to_string()),
        }
    }
}

const CSV_HEADER: [&str; 8] = [
    "id",
    "name",
    "email",
    "phone",
    "message",
    "status",
    "createdAt",
    "updatedAt",
];

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Renders messages as CSV: a quoted header row plus one quoted row per message.
pub fn contact_messages_csv(messages: &[ContactMessage]) -> String {
    let mut out = CSV_HEADER
        .iter()
        .map(|h| csv_field(h))
        .collect::<Vec<_>>()
        .join(",");

    for m in messages {
        let row = [
            m.id.to_string(),
            m.name.clone(),
            m.email.clone(),
            m.phone.clone(),
            m.message.clone(),
            m.status.as_str().to_string(),
            m.created_at.to_rfc3339(),
            m.updated_at.to_rfc3339(),
        ];
        out.push('\n');
        out.push_str(
            &row.iter()
                .map(|v| csv_field(v))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> ContactMessage {
        ContactMessage {
            id: Uuid::nil(),
            name: "Liya".to_string(),
            email: "liya@example.com".to_string(),
            phone: "+251900000000".to_string(),
            message: text.to_string(),
            status: ContactStatus::New,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_csv_quotes_and_escapes() {
        let csv = contact_messages_csv(&[message("Hello, \"team\"\nthanks")]);
        let mut lines = csv.splitn(2, '\n');
        assert_eq!(
            lines.next().unwrap(),
            r#""id","name","email","phone","message","status","createdAt","updatedAt""#
        );
        let row = lines.next().unwrap();
        assert!(row.contains(r#""Hello, ""team""
thanks""#));
        assert!(row.contains(r#""new""#));
    }

    #[test]
    fn test_csv_empty_has_header_only() {
        let csv = contact_messages_csv(&[]);
        assert!(!csv.contains('\n'));
    }

    #[test]
    fn test_status_filter() {
        let query = ContactQuery {
            status: Some("all".to_string()),
            search: None,
        };
        assert_eq!(query.status_filter().unwrap(), None);

        let query = ContactQuery {
            status: Some("replied".to_string()),
            search: None,
        };
        assert_eq!(query.status_filter().unwrap(), Some(ContactStatus::Replied));

        let query = ContactQuery {
            status: Some("archived".to_string()),
            search: None,
        };
        assert!(query.status_filter().is_err());
    }

    #[test]
    fn test_blank_field_detection() {
        let dto = CreateContactDto {
            name: "Liya".to_string(),
            email: "liya@example.com".to_string(),
            phone: "  ".to_string(),
            message: "Hi".to_string(),
        };
        assert!(dto.has_blank_field());
    }
}
