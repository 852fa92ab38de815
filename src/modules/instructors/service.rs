use std::collections::HashMap;

use skillbridge_core::AppError;
use skillbridge_models::notifications::NotificationType;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    CreateInstructorDto, InstructorProfile, InstructorQuery, InstructorWithUser,
    UpdateInstructorDto, UserSummary, normalize_expertise,
};
use crate::modules::notifications::NotificationService;

const PROFILE_COLUMNS: &str = "p.id, p.user_id, p.phone, p.years_of_experience, p.bio, p.status, \
    p.rating, p.students, p.created_at, p.updated_at";

fn instructor_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Instructor not found"))
}

fn profile_exists() -> AppError {
    AppError::conflict(anyhow::anyhow!("Instructor profile already exists for this user"))
}

pub struct InstructorService;

impl InstructorService {
    /// Expertise names linked to one instructor profile, alphabetically.
    pub async fn expertise_names(db: &PgPool, instructor_id: Uuid) -> Result<Vec<String>, AppError> {
        let names = sqlx::query_scalar(
            r#"SELECT e.name FROM instructor_expertise ie
               JOIN expertise e ON e.id = ie.expertise_id
               WHERE ie.instructor_id = $1
               ORDER BY e.name"#,
        )
        .bind(instructor_id)
        .fetch_all(db)
        .await?;
        Ok(names)
    }

    /// Upserts the names into `expertise` and links them to the instructor.
    async fn link_expertise(
        conn: &mut PgConnection,
        instructor_id: Uuid,
        names: &[String],
    ) -> Result<(), AppError> {
        if names.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO expertise (name) SELECT UNNEST($1::text[]) ON CONFLICT (name) DO NOTHING",
        )
        .bind(names)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            r#"INSERT INTO instructor_expertise (instructor_id, expertise_id)
               SELECT $1, id FROM expertise WHERE name = ANY($2)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(instructor_id)
        .bind(names)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn with_users(
        db: &PgPool,
        profiles: Vec<InstructorProfile>,
    ) -> Result<Vec<InstructorWithUser>, AppError> {
        if profiles.is_empty() {
            return Ok(Vec::new());
        }

        let profile_ids: Vec<Uuid> = profiles.iter().map(|p| p.id).collect();
        let user_ids: Vec<Uuid> = profiles.iter().map(|p| p.user_id).collect();

        let users: HashMap<Uuid, UserSummary> = sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, email, role FROM users WHERE id = ANY($1)",
        )
        .bind(&user_ids)
        .fetch_all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

        let links: Vec<(Uuid, String)> = sqlx::query_as(
            r#"SELECT ie.instructor_id, e.name FROM instructor_expertise ie
               JOIN expertise e ON e.id = ie.expertise_id
               WHERE ie.instructor_id = ANY($1)
               ORDER BY e.name"#,
        )
        .bind(&profile_ids)
        .fetch_all(db)
        .await?;

        let mut expertise: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (instructor_id, name) in links {
            expertise.entry(instructor_id).or_default().push(name);
        }

        profiles
            .into_iter()
            .map(|mut profile| {
                let user = users.get(&profile.user_id).cloned().ok_or_else(|| {
                    AppError::internal(anyhow::anyhow!(
                        "Instructor {} references a missing user",
                        profile.id
                    ))
                })?;
                profile.expertise = expertise.remove(&profile.id).unwrap_or_default();
                Ok(InstructorWithUser { profile, user })
            })
            .collect()
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "instructor_profiles"))]
    pub async fn list(
        db: &PgPool,
        query: InstructorQuery,
    ) -> Result<Vec<InstructorWithUser>, AppError> {
        let profiles = sqlx::query_as::<_, InstructorProfile>(&format!(
            r#"SELECT {PROFILE_COLUMNS} FROM instructor_profiles p
               WHERE ($1::record_status IS NULL OR p.status = $1)
                 AND ($2::text IS NULL OR EXISTS (
                     SELECT 1 FROM instructor_expertise ie
                     JOIN expertise e ON e.id = ie.expertise_id
                     WHERE ie.instructor_id = p.id AND e.name = $2
                 ))
               ORDER BY p.created_at DESC"#
        ))
        .bind(query.status)
        .bind(query.expertise.as_deref())
        .fetch_all(db)
        .await?;

        Self::with_users(db, profiles).await
    }

    #[instrument(skip(db), fields(instructor.id = %id, db.operation = "SELECT", db.table = "instructor_profiles"))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<InstructorWithUser, AppError> {
        let profile = sqlx::query_as::<_, InstructorProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM instructor_profiles p WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(instructor_not_found)?;

        Self::with_users(db, vec![profile])
            .await?
            .into_iter()
            .next()
            .ok_or_else(instructor_not_found)
    }

    #[instrument(skip(db, dto), fields(user.id = %dto.user_id, db.operation = "INSERT", db.table = "instructor_profiles"))]
    pub async fn create(db: &PgPool, dto: CreateInstructorDto) -> Result<InstructorWithUser, AppError> {
        let user_name: String = sqlx::query_scalar("SELECT name FROM users WHERE id = $1")
            .bind(dto.user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        let existing: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM instructor_profiles WHERE user_id = $1)",
        )
        .bind(dto.user_id)
        .fetch_one(db)
        .await?;

        if existing {
            return Err(profile_exists());
        }

        let expertise = normalize_expertise(dto.expertise.as_deref().unwrap_or_default());

        let mut tx = db.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"INSERT INTO instructor_profiles
                   (user_id, phone, years_of_experience, bio, status, rating, students)
               VALUES ($1, $2, COALESCE($3, 0), $4, COALESCE($5, 'ACTIVE'::record_status),
                       COALESCE($6, 0), COALESCE($7, 0))
               RETURNING id"#,
        )
        .bind(dto.user_id)
        .bind(dto.phone.as_deref().map(str::trim))
        .bind(dto.years_of_experience)
        .bind(dto.bio.as_deref().map(str::trim))
        .bind(dto.status)
        .bind(dto.rating)
        .bind(dto.students)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return profile_exists();
            }
            AppError::from(e)
        })?;

        Self::link_expertise(&mut tx, id, &expertise).await?;
        tx.commit().await?;

        NotificationService::notify(
            db,
            NotificationType::NewInstructor,
            "New Instructor Added",
            &format!("{user_name} has been added as an instructor"),
        )
        .await;

        Self::get(db, id).await
    }

    /// Partial update; a present `expertise` list replaces every existing link.
    #[instrument(skip(db, dto), fields(instructor.id = %id, db.operation = "UPDATE", db.table = "instructor_profiles"))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        dto: UpdateInstructorDto,
    ) -> Result<InstructorWithUser, AppError> {
        let mut tx = db.begin().await?;

        let result = sqlx::query(
            r#"UPDATE instructor_profiles SET
                   phone = COALESCE($2, phone),
                   years_of_experience = COALESCE($3, years_of_experience),
                   bio = COALESCE($4, bio),
                   status = COALESCE($5, status),
                   rating = COALESCE($6, rating),
                   students = COALESCE($7, students),
                   updated_at = NOW()
               WHERE id = $1"#,
        )
        .bind(id)
        .bind(dto.phone.as_deref().map(str::trim))
        .bind(dto.years_of_experience)
        .bind(dto.bio.as_deref().map(str::trim))
        .bind(dto.status)
        .bind(dto.rating)
        .bind(dto.students)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(instructor_not_found());
        }

        if let Some(names) = dto.expertise.as_deref() {
            sqlx::query("DELETE FROM instructor_expertise WHERE instructor_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::link_expertise(&mut tx, id, &normalize_expertise(names)).await?;
        }

        tx.commit().await?;
        Self::get(db, id).await
    }

    #[instrument(skip(db), fields(instructor.id = %id, db.operation = "DELETE", db.table = "instructor_profiles"))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM instructor_expertise WHERE instructor_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM instructor_profiles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(instructor_not_found());
        }

        tx.commit().await?;
        Ok(())
    }
}
