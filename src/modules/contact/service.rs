use anyhow::anyhow;
use skillbridge_core::AppError;
use skillbridge_models::search::like_pattern;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{ContactMessage, ContactQuery, ContactStatus, CreateContactDto};

const CONTACT_COLUMNS: &str = "id, name, email, phone, message, status, created_at, updated_at";

fn message_not_found() -> AppError {
    AppError::not_found(anyhow!("Message not found"))
}

pub struct ContactService;

impl ContactService {
    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "contact_messages"))]
    pub async fn create(db: &PgPool, dto: CreateContactDto) -> Result<ContactMessage, AppError> {
        if dto.has_blank_field() {
            return Err(AppError::bad_request(anyhow!("All fields are required")));
        }

        let message = sqlx::query_as::<_, ContactMessage>(&format!(
            "INSERT INTO contact_messages (name, email, phone, message) VALUES ($1, $2, $3, $4) RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(dto.name.trim())
        .bind(dto.email.trim())
        .bind(dto.phone.trim())
        .bind(dto.message.trim())
        .fetch_one(db)
        .await?;

        tracing::info!(contact.id = %message.id, "Contact message received");
        Ok(message)
    }

    /// Newest first, optionally filtered by status and a name/email/message search.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "contact_messages"))]
    pub async fn list(db: &PgPool, query: ContactQuery) -> Result<Vec<ContactMessage>, AppError> {
        let status = query.status_filter().map_err(|e| AppError::bad_request(anyhow!(e)))?;
        let pattern = query.search.as_deref().map(like_pattern);

        let messages = sqlx::query_as::<_, ContactMessage>(&format!(
            r#"SELECT {CONTACT_COLUMNS} FROM contact_messages
               WHERE ($1::contact_status IS NULL OR status = $1)
                 AND ($2::text IS NULL OR name ILIKE $2 OR email ILIKE $2 OR message ILIKE $2)
               ORDER BY created_at DESC"#
        ))
        .bind(status)
        .bind(pattern)
        .fetch_all(db)
        .await?;

        Ok(messages)
    }

    #[instrument(skip(db), fields(contact.id = %id, db.operation = "SELECT", db.table = "contact_messages"))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<ContactMessage, AppError> {
        sqlx::query_as::<_, ContactMessage>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_messages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(message_not_found)
    }

    #[instrument(skip(db), fields(contact.id = %id, db.operation = "UPDATE", db.table = "contact_messages"))]
    pub async fn update_status(
        db: &PgPool,
        id: Uuid,
        status: ContactStatus,
    ) -> Result<ContactMessage, AppError> {
        sqlx::query_as::<_, ContactMessage>(&format!(
            "UPDATE contact_messages SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(db)
        .await?
        .ok_or_else(message_not_found)
    }

    #[instrument(skip(db), fields(contact.id = %id, db.operation = "DELETE", db.table = "contact_messages"))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(message_not_found());
        }
        Ok(())
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "contact_messages"))]
    pub async fn all(db: &PgPool) -> Result<Vec<ContactMessage>, AppError> {
        let messages = sqlx::query_as::<_, ContactMessage>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contact_messages ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;
        Ok(messages)
    }
}
