use skillbridge_core::AppError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{Category, CreateCategoryDto, NavbarCategory, UpdateCategoryDto};

pub struct CategoryService;

fn duplicate_name(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_unique_violation()
    {
        return AppError::conflict(anyhow::anyhow!("Category with this name already exists"));
    }
    AppError::from(e)
}

fn not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Category not found"))
}

impl CategoryService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "categories"))]
    pub async fn navbar(db: &PgPool) -> Result<Vec<NavbarCategory>, AppError> {
        let categories = sqlx::query_as::<_, NavbarCategory>(
            "SELECT id, name FROM categories WHERE status = 'ACTIVE' ORDER BY name",
        )
        .fetch_all(db)
        .await?;
        Ok(categories)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "categories"))]
    pub async fn list(db: &PgPool) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            r#"SELECT id, name, description, status, created_at, updated_at
               FROM categories ORDER BY name"#,
        )
        .fetch_all(db)
        .await?;
        Ok(categories)
    }

    #[instrument(skip(db), fields(category.id = %id, db.operation = "SELECT", db.table = "categories"))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"SELECT id, name, description, status, created_at, updated_at
               FROM categories WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db, dto), fields(category.name = %dto.name, db.operation = "INSERT", db.table = "categories"))]
    pub async fn create(db: &PgPool, dto: CreateCategoryDto) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"INSERT INTO categories (name, description, status)
               VALUES ($1, $2, COALESCE($3, 'ACTIVE'::record_status))
               RETURNING id, name, description, status, created_at, updated_at"#,
        )
        .bind(dto.name.trim())
        .bind(dto.description.as_deref().map(str::trim))
        .bind(dto.status)
        .fetch_one(db)
        .await
        .map_err(duplicate_name)
    }

    #[instrument(skip(db, dto), fields(category.id = %id, db.operation = "UPDATE", db.table = "categories"))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCategoryDto,
    ) -> Result<Category, AppError> {
        sqlx::query_as::<_, Category>(
            r#"UPDATE categories SET
                   name = COALESCE($2, name),
                   description = COALESCE($3, description),
                   status = COALESCE($4, status),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, name, description, status, created_at, updated_at"#,
        )
        .bind(id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(dto.description.as_deref().map(str::trim))
        .bind(dto.status)
        .fetch_optional(db)
        .await
        .map_err(duplicate_name)?
        .ok_or_else(not_found)
    }

    /// Refuses with 409 while any course still references the category.
    #[instrument(skip(db), fields(category.id = %id, db.operation = "DELETE", db.table = "categories"))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        Self::get(db, id).await?;

        let in_use: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE category_id = $1")
            .bind(id)
            .fetch_one(db)
            .await?;

        if in_use > 0 {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Cannot delete category: {} course(s) are still assigned to it",
                in_use
            )));
        }

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_foreign_key_violation()
                {
                    return AppError::conflict(anyhow::anyhow!(
                        "Cannot delete category: courses are still assigned to it"
                    ));
                }
                AppError::from(e)
            })?;

        Ok(())
    }
}
