//! Bootstrap of the first super admin account.

use skillbridge_core::hash_password;
use skillbridge_models::{UserRole, normalize_email};
use sqlx::PgPool;
use uuid::Uuid;

/// Creates a SUPER_ADMIN user and its admin profile in one transaction.
///
/// Fails when the email is already registered.
pub async fn create_super_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, Box<dyn std::error::Error>> {
    let email = normalize_email(email);
    if email.is_empty() || !email.contains('@') {
        return Err("A valid email address is required".into());
    }
    if password.len() < 6 {
        return Err("Password must be at least 6 characters".into());
    }

    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let mut tx = db.begin().await?;

    let user_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, password_hash, role, status)
         VALUES ($1, $2, $3, $4, 'ACTIVE')
         ON CONFLICT ((LOWER(email))) DO NOTHING
         RETURNING id",
    )
    .bind(name.trim())
    .bind(&email)
    .bind(&hashed_password)
    .bind(UserRole::SuperAdmin)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(user_id) = user_id else {
        tx.rollback().await?;
        return Err("User with this email already exists".into());
    };

    sqlx::query("INSERT INTO admin_profiles (user_id) VALUES ($1)")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(user_id)
}
