use skillbridge_core::AppError;
use skillbridge_core::file_storage::{FileStorage, ReceiptKind, StorageError};
use skillbridge_models::notifications::NotificationType;
use skillbridge_models::search::like_pattern;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    Application, ApplicationQuery, ApplicationStatus, CreateApplicationDto, UpdateApplicationDto,
};
use crate::metrics::{track_application_reviewed, track_application_submitted};
use crate::modules::courses::service::course_not_found;
use crate::modules::notifications::NotificationService;

pub(crate) const APPLICATION_SELECT: &str = r#"SELECT a.id, a.course_id, a.student_id, a.full_name,
        a.date_of_birth, a.gender, a.university, a.email, a.phone, a.telegram_handle, a.address,
        a.payment_method, a.payment_reference, a.marketing_source, a.status, a.admin_notes,
        a.receipt_verified, a.receipt_url, a.reviewed_by, a.reviewed_at, a.submitted_at,
        a.updated_at, c.title AS course_title, COALESCE(u.name, a.full_name) AS student_name
    FROM student_applications a
    JOIN courses c ON c.id = a.course_id
    LEFT JOIN users u ON u.id = a.student_id"#;

pub(crate) fn application_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Application not found"))
}

fn storage_error(e: StorageError) -> AppError {
    if e.is_client_error() {
        AppError::bad_request(e)
    } else {
        AppError::internal(e)
    }
}

pub struct ApplicationService;

impl ApplicationService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "student_applications"))]
    pub async fn list(db: &PgPool, query: ApplicationQuery) -> Result<Vec<Application>, AppError> {
        let pattern = query.search.as_deref().map(like_pattern);

        let applications = sqlx::query_as::<_, Application>(&format!(
            r#"{APPLICATION_SELECT}
               WHERE ($1::application_status IS NULL OR a.status = $1)
                 AND ($2::uuid IS NULL OR a.course_id = $2)
                 AND ($3::text IS NULL OR a.full_name ILIKE $3 OR a.email ILIKE $3
                      OR a.payment_reference ILIKE $3)
               ORDER BY a.submitted_at DESC"#
        ))
        .bind(query.status)
        .bind(query.course_id)
        .bind(pattern)
        .fetch_all(db)
        .await?;

        Ok(applications)
    }

    #[instrument(skip(db), fields(user.id = %student_id, db.operation = "SELECT", db.table = "student_applications"))]
    pub async fn list_for_student(db: &PgPool, student_id: Uuid) -> Result<Vec<Application>, AppError> {
        let applications = sqlx::query_as::<_, Application>(&format!(
            "{APPLICATION_SELECT} WHERE a.student_id = $1 ORDER BY a.submitted_at DESC"
        ))
        .bind(student_id)
        .fetch_all(db)
        .await?;

        Ok(applications)
    }

    #[instrument(skip(db), fields(application.id = %id, db.operation = "SELECT", db.table = "student_applications"))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Application, AppError> {
        sqlx::query_as::<_, Application>(&format!("{APPLICATION_SELECT} WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(application_not_found)
    }

    /// Checks type, magic bytes and size, then writes the receipt and returns its public URL.
    pub async fn store_receipt(
        storage: &dyn FileStorage,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, AppError> {
        let kind = ReceiptKind::detect(content_type, data).map_err(storage_error)?;

        if data.len() > storage.max_file_size() {
            return Err(storage_error(StorageError::InvalidFileSize {
                max_bytes: storage.max_file_size(),
            }));
        }

        let key = storage
            .save(&kind.receipt_key(), data)
            .await
            .map_err(storage_error)?;

        storage.get_url(&key).map_err(storage_error)
    }

    /// Inserts an application for `student_id`; the course must exist.
    #[instrument(skip(db, dto, receipt_url), fields(user.id = %student_id, course.id = %dto.course_id, db.operation = "INSERT", db.table = "student_applications"))]
    pub async fn create(
        db: &PgPool,
        student_id: Uuid,
        dto: CreateApplicationDto,
        receipt_url: Option<String>,
    ) -> Result<Application, AppError> {
        let course_title: String = sqlx::query_scalar("SELECT title FROM courses WHERE id = $1")
            .bind(dto.course_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(course_not_found)?;

        let with_receipt = receipt_url.is_some();

        let id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO student_applications
                   (course_id, student_id, full_name, date_of_birth, gender, university, email,
                    phone, telegram_handle, address, payment_method, payment_reference,
                    marketing_source, receipt_url)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
               RETURNING id"#,
        )
        .bind(dto.course_id)
        .bind(student_id)
        .bind(dto.full_name.trim())
        .bind(dto.date_of_birth)
        .bind(dto.gender.trim())
        .bind(dto.university.as_deref().map(str::trim))
        .bind(dto.email.trim())
        .bind(dto.phone.trim())
        .bind(dto.telegram_handle.as_deref().map(str::trim))
        .bind(dto.address.trim())
        .bind(dto.payment_method)
        .bind(dto.payment_reference.trim())
        .bind(dto.marketing_source.as_deref().map(str::trim))
        .bind(receipt_url)
        .fetch_one(db)
        .await?;

        track_application_submitted(with_receipt);
        NotificationService::notify(
            db,
            NotificationType::NewApplication,
            "New Application Received",
            &format!("{} applied for \"{}\"", dto.full_name.trim(), course_title),
        )
        .await;

        Self::get(db, id).await
    }

    /// Applies a staff review. A status change stamps the reviewer and time.
    #[instrument(skip(db, dto), fields(application.id = %id, user.id = %reviewer_id, db.operation = "UPDATE", db.table = "student_applications"))]
    pub async fn review(
        db: &PgPool,
        id: Uuid,
        reviewer_id: Uuid,
        dto: UpdateApplicationDto,
    ) -> Result<Application, AppError> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"UPDATE student_applications SET
                   status = COALESCE($2, status),
                   admin_notes = COALESCE($3, admin_notes),
                   receipt_verified = COALESCE($4, receipt_verified),
                   reviewed_by = CASE WHEN $2::application_status IS NULL THEN reviewed_by ELSE $5 END,
                   reviewed_at = CASE WHEN $2::application_status IS NULL THEN reviewed_at ELSE NOW() END,
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id"#,
        )
        .bind(id)
        .bind(dto.status)
        .bind(dto.admin_notes.as_deref().map(str::trim))
        .bind(dto.receipt_verified)
        .bind(reviewer_id)
        .fetch_optional(db)
        .await?;

        if updated.is_none() {
            return Err(application_not_found());
        }

        let application = Self::get(db, id).await?;

        if let Some(status) = dto.status {
            let (label, notification) = match status {
                ApplicationStatus::Pending => ("PENDING", None),
                ApplicationStatus::Approved => (
                    "APPROVED",
                    Some((NotificationType::ApplicationApproved, "Application Approved", "approved")),
                ),
                ApplicationStatus::Rejected => (
                    "REJECTED",
                    Some((NotificationType::ApplicationRejected, "Application Rejected", "rejected")),
                ),
            };

            track_application_reviewed(label);

            if let Some((kind, title, verb)) = notification {
                NotificationService::notify(
                    db,
                    kind,
                    title,
                    &format!(
                        "Application from {} for \"{}\" was {}",
                        application.full_name, application.course_title, verb
                    ),
                )
                .await;
            }
        }

        Ok(application)
    }

    #[instrument(skip(db, url), fields(application.id = %id, db.operation = "UPDATE", db.table = "student_applications"))]
    pub async fn set_receipt(db: &PgPool, id: Uuid, url: &str) -> Result<Application, AppError> {
        let result = sqlx::query(
            "UPDATE student_applications SET receipt_url = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(url)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(application_not_found());
        }

        Self::get(db, id).await
    }
}
