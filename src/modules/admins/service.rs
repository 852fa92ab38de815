use std::collections::HashMap;

use skillbridge_core::{AppError, hash_password};
use skillbridge_models::normalize_email;
use skillbridge_models::search::like_pattern;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    AdminProfile, AdminQuery, AdminWithProfile, CreateAdminDto, UpdateAdminDto, User, UserRole,
    UserStatus,
};
use crate::modules::auth::AuthService;

const USER_COLUMNS: &str = "id, name, email, role, status, created_at, updated_at";
const ADMIN_TIER: &str = "role IN ('SUPER_ADMIN', 'ADMIN', 'SUPPORT')";

fn admin_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Admin not found"))
}

pub struct AdminService;

impl AdminService {
    async fn with_profiles(db: &PgPool, users: Vec<User>) -> Result<Vec<AdminWithProfile>, AppError> {
        let user_ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();

        let mut profiles: HashMap<Uuid, AdminProfile> = sqlx::query_as::<_, AdminProfile>(
            "SELECT id, user_id, department, created_at FROM admin_profiles WHERE user_id = ANY($1)",
        )
        .bind(&user_ids)
        .fetch_all(db)
        .await?
        .into_iter()
        .map(|p| (p.user_id, p))
        .collect();

        Ok(users
            .into_iter()
            .map(|user| AdminWithProfile {
                admin_profile: profiles.remove(&user.id),
                user,
            })
            .collect())
    }

    async fn get(db: &PgPool, id: Uuid) -> Result<AdminWithProfile, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND {ADMIN_TIER}"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(admin_not_found)?;

        Self::with_profiles(db, vec![user])
            .await?
            .into_iter()
            .next()
            .ok_or_else(admin_not_found)
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn list(db: &PgPool, query: AdminQuery) -> Result<Vec<AdminWithProfile>, AppError> {
        let pattern = query.search.as_deref().map(like_pattern);

        let users = sqlx::query_as::<_, User>(&format!(
            r#"SELECT {USER_COLUMNS} FROM users
               WHERE {ADMIN_TIER}
                 AND ($1::text IS NULL OR name ILIKE $1 OR email ILIKE $1)
               ORDER BY created_at DESC"#
        ))
        .bind(pattern)
        .fetch_all(db)
        .await?;

        Self::with_profiles(db, users).await
    }

    #[instrument(skip(db, dto), fields(user.email = %dto.email, db.operation = "INSERT", db.table = "users"))]
    pub async fn create(db: &PgPool, dto: CreateAdminDto) -> Result<AdminWithProfile, AppError> {
        let email = normalize_email(&dto.email);
        if AuthService::email_taken(db, &email).await? {
            return Err(AppError::conflict(anyhow::anyhow!("User already exists")));
        }

        let mut tx = db.begin().await?;
        let user = AuthService::insert_user(
            &mut tx,
            &dto.name,
            &email,
            &dto.password,
            dto.role.unwrap_or(UserRole::Admin),
            dto.status.unwrap_or(UserStatus::Active),
        )
        .await?;

        sqlx::query("INSERT INTO admin_profiles (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(user.id = %user.id, user.role = %user.role, "Admin user created");
        Self::get(db, user.id).await
    }

    #[instrument(skip(db, dto), fields(user.id = %id, db.operation = "UPDATE", db.table = "users"))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateAdminDto) -> Result<AdminWithProfile, AppError> {
        let password_hash = dto.password.as_deref().map(hash_password).transpose()?;
        let email = dto.email.as_deref().map(normalize_email);

        let updated = sqlx::query_scalar::<_, Uuid>(&format!(
            r#"UPDATE users SET
                   name = COALESCE($2, name),
                   email = COALESCE($3, email),
                   password_hash = COALESCE($4, password_hash),
                   role = COALESCE($5, role),
                   status = COALESCE($6, status),
                   updated_at = NOW()
               WHERE id = $1 AND {ADMIN_TIER}
               RETURNING id"#
        ))
        .bind(id)
        .bind(dto.name.as_deref().map(str::trim))
        .bind(email)
        .bind(password_hash)
        .bind(dto.role)
        .bind(dto.status)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict(anyhow::anyhow!("User already exists"));
            }
            AppError::from(e)
        })?;

        if updated.is_none() {
            return Err(admin_not_found());
        }

        Self::get(db, id).await
    }

    /// Removes the admin profile, then the user, in one transaction.
    #[instrument(skip(db), fields(user.id = %id, db.operation = "DELETE", db.table = "users"))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM admin_profiles WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(&format!("DELETE FROM users WHERE id = $1 AND {ADMIN_TIER}"))
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_foreign_key_violation()
                {
                    return AppError::conflict(anyhow::anyhow!(
                        "Cannot delete admin: other records still reference this user"
                    ));
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(admin_not_found());
        }

        tx.commit().await?;
        Ok(())
    }
}
