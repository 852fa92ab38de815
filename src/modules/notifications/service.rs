use skillbridge_core::{AppError, PageMeta, PageParams};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{Notification, NotificationPage, NotificationQuery, NotificationType};

const DEFAULT_PAGE_SIZE: i64 = 10;

pub struct NotificationService;

impl NotificationService {
    /// Records a back-office notification.
    ///
    /// Failures are logged and swallowed so the calling operation never fails
    /// on account of a notification.
    #[instrument(skip(db, message), fields(db.operation = "INSERT", db.table = "notifications"))]
    pub async fn notify(db: &PgPool, kind: NotificationType, title: &str, message: &str) {
        let result = sqlx::query("INSERT INTO notifications (type, title, message) VALUES ($1, $2, $3)")
            .bind(kind)
            .bind(title)
            .bind(message)
            .execute(db)
            .await;

        if let Err(e) = result {
            tracing::warn!(error = %e, ?kind, "Failed to record notification");
        }
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "notifications"))]
    pub async fn list(db: &PgPool, query: NotificationQuery) -> Result<NotificationPage, AppError> {
        let params = PageParams {
            page: query.page,
            limit: query.limit,
        };
        let page = params.page();
        let limit = params.limit_or(DEFAULT_PAGE_SIZE);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE ($1 = FALSE OR is_read = FALSE)",
        )
        .bind(query.unread_only)
        .fetch_one(db)
        .await?;

        let notifications = sqlx::query_as::<_, Notification>(
            r#"SELECT id, type, title, message, is_read, created_at
               FROM notifications
               WHERE ($1 = FALSE OR is_read = FALSE)
               ORDER BY created_at DESC
               LIMIT $2 OFFSET $3"#,
        )
        .bind(query.unread_only)
        .bind(limit)
        .bind(params.offset(limit))
        .fetch_all(db)
        .await?;

        Ok(NotificationPage {
            notifications,
            pagination: PageMeta::new(page, limit, total),
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "notifications"))]
    pub async fn unread_count(db: &PgPool) -> Result<i64, AppError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE is_read = FALSE")
            .fetch_one(db)
            .await?;
        Ok(count)
    }

    #[instrument(skip(db), fields(notification.id = %id, db.operation = "UPDATE", db.table = "notifications"))]
    pub async fn mark_read(db: &PgPool, id: Uuid) -> Result<Notification, AppError> {
        sqlx::query_as::<_, Notification>(
            r#"UPDATE notifications SET is_read = TRUE
               WHERE id = $1
               RETURNING id, type, title, message, is_read, created_at"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Notification not found")))
    }

    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "notifications"))]
    pub async fn mark_all_read(db: &PgPool) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE is_read = FALSE")
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    #[instrument(skip(db), fields(notification.id = %id, db.operation = "DELETE", db.table = "notifications"))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Notification not found")));
        }
        Ok(())
    }
}
