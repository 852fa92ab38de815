//! Module, lesson, learning-outcome and prerequisite sub-resources.
//!
//! Items created without an explicit `order` are appended after the current
//! last position of their parent.

use skillbridge_core::AppError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    CourseLesson, CourseModule, CourseTextItem, CreateLessonDto, CreateModuleDto,
    CreateTextItemDto, DEFAULT_LESSON_DURATION, UpdateLessonDto, UpdateModuleDto,
    UpdateTextItemDto,
};
use super::service::CourseService;

const MODULE_COLUMNS: &str = "id, course_id, title, duration, sort_order, created_at, updated_at";
const LESSON_COLUMNS: &str = "id, module_id, title, duration, sort_order, created_at, updated_at";

fn module_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Module not found"))
}

fn lesson_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Lesson not found"))
}

/// The two plain-text course lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextItemKind {
    LearningOutcome,
    Prerequisite,
}

impl TextItemKind {
    fn table(self) -> &'static str {
        match self {
            Self::LearningOutcome => "learning_outcomes",
            Self::Prerequisite => "prerequisites",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LearningOutcome => "Learning outcome",
            Self::Prerequisite => "Prerequisite",
        }
    }

    fn not_found(self) -> AppError {
        AppError::not_found(anyhow::anyhow!("{} not found", self.label()))
    }
}

pub struct CurriculumService;

impl CurriculumService {
    #[instrument(skip(db), fields(course.id = %course_id, db.operation = "SELECT", db.table = "course_modules"))]
    pub async fn list_modules(db: &PgPool, course_id: Uuid) -> Result<Vec<CourseModule>, AppError> {
        CourseService::ensure_exists(db, course_id).await?;

        let modules = sqlx::query_as::<_, CourseModule>(&format!(
            "SELECT {MODULE_COLUMNS} FROM course_modules WHERE course_id = $1 ORDER BY sort_order, created_at"
        ))
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(modules)
    }

    #[instrument(skip(db, dto), fields(course.id = %dto.course_id, db.operation = "INSERT", db.table = "course_modules"))]
    pub async fn create_module(db: &PgPool, dto: CreateModuleDto) -> Result<CourseModule, AppError> {
        CourseService::ensure_exists(db, dto.course_id).await?;

        let module = sqlx::query_as::<_, CourseModule>(&format!(
            r#"INSERT INTO course_modules (course_id, title, duration, sort_order)
               VALUES ($1, $2, $3, COALESCE($4, (
                   SELECT COALESCE(MAX(sort_order), 0) + 1 FROM course_modules WHERE course_id = $1
               )))
               RETURNING {MODULE_COLUMNS}"#
        ))
        .bind(dto.course_id)
        .bind(dto.title.trim())
        .bind(dto.duration.trim())
        .bind(dto.order)
        .fetch_one(db)
        .await?;

        Ok(module)
    }

    #[instrument(skip(db, dto), fields(module.id = %id, db.operation = "UPDATE", db.table = "course_modules"))]
    pub async fn update_module(
        db: &PgPool,
        id: Uuid,
        dto: UpdateModuleDto,
    ) -> Result<CourseModule, AppError> {
        sqlx::query_as::<_, CourseModule>(&format!(
            r#"UPDATE course_modules SET
                   title = COALESCE($2, title),
                   duration = COALESCE($3, duration),
                   sort_order = COALESCE($4, sort_order),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {MODULE_COLUMNS}"#
        ))
        .bind(id)
        .bind(dto.title.as_deref().map(str::trim))
        .bind(dto.duration.as_deref().map(str::trim))
        .bind(dto.order)
        .fetch_optional(db)
        .await?
        .ok_or_else(module_not_found)
    }

    /// Deletes the module together with its lessons.
    #[instrument(skip(db), fields(module.id = %id, db.operation = "DELETE", db.table = "course_modules"))]
    pub async fn delete_module(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM course_lessons WHERE module_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM course_modules WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(module_not_found());
        }

        tx.commit().await?;
        Ok(())
    }

    async fn ensure_module(db: &PgPool, module_id: Uuid) -> Result<(), AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM course_modules WHERE id = $1)")
                .bind(module_id)
                .fetch_one(db)
                .await?;

        if exists { Ok(()) } else { Err(module_not_found()) }
    }

    #[instrument(skip(db), fields(module.id = %module_id, db.operation = "SELECT", db.table = "course_lessons"))]
    pub async fn list_lessons(db: &PgPool, module_id: Uuid) -> Result<Vec<CourseLesson>, AppError> {
        Self::ensure_module(db, module_id).await?;

        let lessons = sqlx::query_as::<_, CourseLesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM course_lessons WHERE module_id = $1 ORDER BY sort_order, created_at"
        ))
        .bind(module_id)
        .fetch_all(db)
        .await?;

        Ok(lessons)
    }

    #[instrument(skip(db, dto), fields(module.id = %dto.module_id, db.operation = "INSERT", db.table = "course_lessons"))]
    pub async fn create_lesson(db: &PgPool, dto: CreateLessonDto) -> Result<CourseLesson, AppError> {
        Self::ensure_module(db, dto.module_id).await?;

        let duration = dto
            .duration
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_LESSON_DURATION);

        let lesson = sqlx::query_as::<_, CourseLesson>(&format!(
            r#"INSERT INTO course_lessons (module_id, title, duration, sort_order)
               VALUES ($1, $2, $3, COALESCE($4, (
                   SELECT COALESCE(MAX(sort_order), 0) + 1 FROM course_lessons WHERE module_id = $1
               )))
               RETURNING {LESSON_COLUMNS}"#
        ))
        .bind(dto.module_id)
        .bind(dto.title.trim())
        .bind(duration)
        .bind(dto.order)
        .fetch_one(db)
        .await?;

        Ok(lesson)
    }

    #[instrument(skip(db, dto), fields(lesson.id = %id, db.operation = "UPDATE", db.table = "course_lessons"))]
    pub async fn update_lesson(
        db: &PgPool,
        id: Uuid,
        dto: UpdateLessonDto,
    ) -> Result<CourseLesson, AppError> {
        sqlx::query_as::<_, CourseLesson>(&format!(
            r#"UPDATE course_lessons SET
                   title = COALESCE($2, title),
                   duration = COALESCE($3, duration),
                   sort_order = COALESCE($4, sort_order),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {LESSON_COLUMNS}"#
        ))
        .bind(id)
        .bind(dto.title.as_deref().map(str::trim))
        .bind(dto.duration.as_deref().map(str::trim))
        .bind(dto.order)
        .fetch_optional(db)
        .await?
        .ok_or_else(lesson_not_found)
    }

    #[instrument(skip(db), fields(lesson.id = %id, db.operation = "DELETE", db.table = "course_lessons"))]
    pub async fn delete_lesson(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM course_lessons WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(lesson_not_found());
        }
        Ok(())
    }

    #[instrument(skip(db), fields(course.id = %course_id, db.operation = "SELECT"))]
    pub async fn list_texts(
        db: &PgPool,
        kind: TextItemKind,
        course_id: Uuid,
    ) -> Result<Vec<CourseTextItem>, AppError> {
        CourseService::ensure_exists(db, course_id).await?;

        let items = sqlx::query_as::<_, CourseTextItem>(&format!(
            "SELECT id, course_id, text, created_at FROM {} WHERE course_id = $1 ORDER BY seq",
            kind.table()
        ))
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(items)
    }

    #[instrument(skip(db, dto), fields(course.id = %dto.course_id, db.operation = "INSERT"))]
    pub async fn create_text(
        db: &PgPool,
        kind: TextItemKind,
        dto: CreateTextItemDto,
    ) -> Result<CourseTextItem, AppError> {
        CourseService::ensure_exists(db, dto.course_id).await?;

        let item = sqlx::query_as::<_, CourseTextItem>(&format!(
            "INSERT INTO {} (course_id, text) VALUES ($1, $2) RETURNING id, course_id, text, created_at",
            kind.table()
        ))
        .bind(dto.course_id)
        .bind(dto.text.trim())
        .fetch_one(db)
        .await?;

        Ok(item)
    }

    #[instrument(skip(db, dto), fields(item.id = %id, db.operation = "UPDATE"))]
    pub async fn update_text(
        db: &PgPool,
        kind: TextItemKind,
        id: Uuid,
        dto: UpdateTextItemDto,
    ) -> Result<CourseTextItem, AppError> {
        sqlx::query_as::<_, CourseTextItem>(&format!(
            "UPDATE {} SET text = $2 WHERE id = $1 RETURNING id, course_id, text, created_at",
            kind.table()
        ))
        .bind(id)
        .bind(dto.text.trim())
        .fetch_optional(db)
        .await?
        .ok_or_else(|| kind.not_found())
    }

    #[instrument(skip(db), fields(item.id = %id, db.operation = "DELETE"))]
    pub async fn delete_text(db: &PgPool, kind: TextItemKind, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(kind.not_found());
        }
        Ok(())
    }
}
