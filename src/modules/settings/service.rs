use skillbridge_core::AppError;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::instrument;

use super::model::SettingsSection;

pub struct SettingsService;

impl SettingsService {
    /// Reads a section, materializing its defaults on first access.
    #[instrument(skip(db), fields(settings.section = S::KEY, db.operation = "SELECT", db.table = "settings"))]
    pub async fn get<S: SettingsSection>(db: &PgPool) -> Result<S, AppError> {
        let stored: Option<Json<S>> =
            sqlx::query_scalar("SELECT value FROM settings WHERE section = $1")
                .bind(S::KEY)
                .fetch_optional(db)
                .await?;

        if let Some(Json(settings)) = stored {
            return Ok(settings);
        }

        let defaults = S::default();
        sqlx::query(
            "INSERT INTO settings (section, value) VALUES ($1, $2) ON CONFLICT (section) DO NOTHING",
        )
        .bind(S::KEY)
        .bind(Json(&defaults))
        .execute(db)
        .await?;

        tracing::debug!(section = S::KEY, "Created default settings");
        Ok(defaults)
    }

    #[instrument(skip(db, settings), fields(settings.section = S::KEY, db.operation = "UPSERT", db.table = "settings"))]
    pub async fn save<S: SettingsSection>(db: &PgPool, settings: S) -> Result<S, AppError> {
        sqlx::query(
            r#"INSERT INTO settings (section, value) VALUES ($1, $2)
               ON CONFLICT (section) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()"#,
        )
        .bind(S::KEY)
        .bind(Json(&settings))
        .execute(db)
        .await?;

        Ok(settings)
    }

    pub async fn reset<S: SettingsSection>(db: &PgPool) -> Result<S, AppError> {
        Self::save(db, S::default()).await
    }
}
