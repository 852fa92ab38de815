use std::collections::HashMap;

use skillbridge_core::AppError;
use skillbridge_models::UserSummary;
use skillbridge_models::notifications::NotificationType;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    CategorySummary, ComprehensiveCourseDto, Course, CourseChildren, CourseDetails, CourseLesson,
    CourseModule, CourseTextItem, CreateCourseDto, LandingCourse, LandingQuery, LandingSort,
    UpdateCourseDto,
};
use crate::modules::notifications::NotificationService;

pub(crate) const COURSE_COLUMNS: &str = "id, title, short_description, detailed_description, \
    image_url, price_original, price_discounted, status, level, duration, category_id, \
    instructor_id, created_at, updated_at";

const INVALID_REFERENCE: &str =
    "Invalid category or instructor ID. Please check that both exist in the system.";

pub(crate) fn course_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Course not found"))
}

fn map_reference_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
    {
        return AppError::bad_request(anyhow::anyhow!(INVALID_REFERENCE));
    }
    AppError::from(e)
}

fn group_by<T>(items: Vec<T>, key: impl Fn(&T) -> Uuid) -> HashMap<Uuid, Vec<T>> {
    let mut groups: HashMap<Uuid, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

pub struct CourseService;

impl CourseService {
    async fn insert_course(conn: &mut PgConnection, dto: &CreateCourseDto) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"INSERT INTO courses (title, short_description, detailed_description, image_url,
                                    price_original, price_discounted, status, level, duration,
                                    category_id, instructor_id)
               VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'DRAFT'::course_status), $8, $9, $10, $11)
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(dto.title.trim())
        .bind(dto.short_description.trim())
        .bind(dto.detailed_description.trim())
        .bind(dto.image_url.as_deref())
        .bind(dto.price_original)
        .bind(dto.price_discounted)
        .bind(dto.status)
        .bind(dto.level)
        .bind(dto.duration.trim())
        .bind(dto.category_id)
        .bind(dto.instructor_id)
        .fetch_one(conn)
        .await
        .map_err(map_reference_error)
    }

    /// Overwrites every scalar column. `None` when the course does not exist.
    async fn replace_scalars(
        conn: &mut PgConnection,
        id: Uuid,
        dto: &CreateCourseDto,
    ) -> Result<Option<Course>, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"UPDATE courses SET
                   title = $2,
                   short_description = $3,
                   detailed_description = $4,
                   image_url = $5,
                   price_original = $6,
                   price_discounted = $7,
                   status = COALESCE($8, status),
                   level = $9,
                   duration = $10,
                   category_id = $11,
                   instructor_id = $12,
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(id)
        .bind(dto.title.trim())
        .bind(dto.short_description.trim())
        .bind(dto.detailed_description.trim())
        .bind(dto.image_url.as_deref())
        .bind(dto.price_original)
        .bind(dto.price_discounted)
        .bind(dto.status)
        .bind(dto.level)
        .bind(dto.duration.trim())
        .bind(dto.category_id)
        .bind(dto.instructor_id)
        .fetch_optional(conn)
        .await
        .map_err(map_reference_error)
    }

    async fn insert_texts(
        conn: &mut PgConnection,
        table: &str,
        course_id: Uuid,
        texts: &[String],
    ) -> Result<(), AppError> {
        if texts.is_empty() {
            return Ok(());
        }

        sqlx::query(&format!(
            r#"INSERT INTO {table} (course_id, text)
               SELECT $1, t FROM UNNEST($2::text[]) WITH ORDINALITY AS u(t, ord)
               ORDER BY ord"#
        ))
        .bind(course_id)
        .bind(texts)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Inserts outcomes, prerequisites and modules with their lessons.
    async fn insert_children(
        conn: &mut PgConnection,
        course_id: Uuid,
        children: &CourseChildren,
    ) -> Result<(), AppError> {
        Self::insert_texts(&mut *conn, "learning_outcomes", course_id, &children.learning_outcomes)
            .await?;
        Self::insert_texts(&mut *conn, "prerequisites", course_id, &children.prerequisites).await?;

        for module in &children.modules {
            let module_id: Uuid = sqlx::query_scalar(
                r#"INSERT INTO course_modules (course_id, title, duration, sort_order)
                   VALUES ($1, $2, $3, $4)
                   RETURNING id"#,
            )
            .bind(course_id)
            .bind(&module.title)
            .bind(&module.duration)
            .bind(module.order)
            .fetch_one(&mut *conn)
            .await?;

            if module.lessons.is_empty() {
                continue;
            }

            let titles: Vec<&str> = module.lessons.iter().map(|l| l.title.as_str()).collect();
            let durations: Vec<&str> = module.lessons.iter().map(|l| l.duration.as_str()).collect();
            let orders: Vec<i32> = module.lessons.iter().map(|l| l.order).collect();

            sqlx::query(
                r#"INSERT INTO course_lessons (module_id, title, duration, sort_order)
                   SELECT $1, t, d, o FROM UNNEST($2::text[], $3::text[], $4::int4[]) AS u(t, d, o)"#,
            )
            .bind(module_id)
            .bind(&titles)
            .bind(&durations)
            .bind(&orders)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// Removes lessons, modules, outcomes and prerequisites, children first.
    async fn delete_children(conn: &mut PgConnection, course_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            "DELETE FROM course_lessons WHERE module_id IN (SELECT id FROM course_modules WHERE course_id = $1)",
        )
        .bind(course_id)
        .execute(&mut *conn)
        .await?;

        for table in ["course_modules", "learning_outcomes", "prerequisites"] {
            sqlx::query(&format!("DELETE FROM {table} WHERE course_id = $1"))
                .bind(course_id)
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }

    /// Loads category, instructor and curriculum for each course, keeping input order.
    async fn assemble(db: &PgPool, courses: Vec<Course>) -> Result<Vec<CourseDetails>, AppError> {
        if courses.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<Uuid> = courses.iter().map(|c| c.id).collect();
        let category_ids: Vec<Uuid> = courses.iter().map(|c| c.category_id).collect();
        let instructor_ids: Vec<Uuid> = courses.iter().map(|c| c.instructor_id).collect();

        let categories: HashMap<Uuid, CategorySummary> = sqlx::query_as::<_, CategorySummary>(
            "SELECT id, name, description, status FROM categories WHERE id = ANY($1)",
        )
        .bind(&category_ids)
        .fetch_all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

        let instructors: HashMap<Uuid, UserSummary> = sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, email, role FROM users WHERE id = ANY($1)",
        )
        .bind(&instructor_ids)
        .fetch_all(db)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

        let modules = sqlx::query_as::<_, CourseModule>(
            r#"SELECT id, course_id, title, duration, sort_order, created_at, updated_at
               FROM course_modules
               WHERE course_id = ANY($1)
               ORDER BY sort_order, created_at"#,
        )
        .bind(&course_ids)
        .fetch_all(db)
        .await?;

        let module_ids: Vec<Uuid> = modules.iter().map(|m| m.id).collect();
        let lessons = sqlx::query_as::<_, CourseLesson>(
            r#"SELECT id, module_id, title, duration, sort_order, created_at, updated_at
               FROM course_lessons
               WHERE module_id = ANY($1)
               ORDER BY sort_order, created_at"#,
        )
        .bind(&module_ids)
        .fetch_all(db)
        .await?;

        let outcomes = sqlx::query_as::<_, CourseTextItem>(
            "SELECT id, course_id, text, created_at FROM learning_outcomes WHERE course_id = ANY($1) ORDER BY seq",
        )
        .bind(&course_ids)
        .fetch_all(db)
        .await?;

        let prerequisites = sqlx::query_as::<_, CourseTextItem>(
            "SELECT id, course_id, text, created_at FROM prerequisites WHERE course_id = ANY($1) ORDER BY seq",
        )
        .bind(&course_ids)
        .fetch_all(db)
        .await?;

        let mut lessons_by_module = group_by(lessons, |l| l.module_id);
        let modules: Vec<CourseModule> = modules
            .into_iter()
            .map(|mut module| {
                module.lessons = lessons_by_module.remove(&module.id).unwrap_or_default();
                module
            })
            .collect();

        let mut modules_by_course = group_by(modules, |m| m.course_id);
        let mut outcomes_by_course = group_by(outcomes, |o| o.course_id);
        let mut prerequisites_by_course = group_by(prerequisites, |p| p.course_id);

        courses
            .into_iter()
            .map(|course| {
                let category = categories.get(&course.category_id).cloned().ok_or_else(|| {
                    AppError::internal(anyhow::anyhow!(
                        "Course {} references a missing category",
                        course.id
                    ))
                })?;
                let instructor = instructors.get(&course.instructor_id).cloned().ok_or_else(|| {
                    AppError::internal(anyhow::anyhow!(
                        "Course {} references a missing instructor",
                        course.id
                    ))
                })?;

                Ok(CourseDetails {
                    category,
                    instructor,
                    modules: modules_by_course.remove(&course.id).unwrap_or_default(),
                    learning_outcomes: outcomes_by_course.remove(&course.id).unwrap_or_default(),
                    prerequisites: prerequisites_by_course.remove(&course.id).unwrap_or_default(),
                    course,
                })
            })
            .collect()
    }

    async fn fetch_course(db: &PgPool, id: Uuid) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(course)
    }

    pub(crate) async fn ensure_exists(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
            .bind(id)
            .fetch_one(db)
            .await?;

        if exists { Ok(()) } else { Err(course_not_found()) }
    }

    async fn notify_created(db: &PgPool, course: &Course) {
        NotificationService::notify(
            db,
            NotificationType::NewCourse,
            "New Course Created",
            &format!("Course \"{}\" has been created", course.title),
        )
        .await;
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn list(db: &PgPool) -> Result<Vec<CourseDetails>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await?;

        Self::assemble(db, courses).await
    }

    #[instrument(skip(db), fields(course.id = %id, db.operation = "SELECT", db.table = "courses"))]
    pub async fn get(db: &PgPool, id: Uuid) -> Result<CourseDetails, AppError> {
        let course = Self::fetch_course(db, id).await?.ok_or_else(course_not_found)?;

        Self::assemble(db, vec![course])
            .await?
            .into_iter()
            .next()
            .ok_or_else(course_not_found)
    }

    /// Published courses for the public landing page.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn landing(db: &PgPool, query: LandingQuery) -> Result<Vec<LandingCourse>, AppError> {
        let order_by = match query.sort.unwrap_or_default() {
            LandingSort::Newest => "c.created_at DESC",
            LandingSort::Popular => "application_count DESC, c.created_at DESC",
        };

        let courses = sqlx::query_as::<_, LandingCourse>(&format!(
            r#"SELECT c.id, c.title, c.short_description, c.image_url, c.price_original,
                      c.price_discounted, c.level, c.duration, c.category_id,
                      cat.name AS category_name, u.name AS instructor_name,
                      COUNT(a.id) AS application_count, c.created_at
               FROM courses c
               JOIN categories cat ON cat.id = c.category_id
               JOIN users u ON u.id = c.instructor_id
               LEFT JOIN student_applications a ON a.course_id = c.id
               WHERE c.status = 'PUBLISHED'
                 AND ($1::text IS NULL OR cat.id::text = $1 OR LOWER(cat.name) = LOWER($1))
               GROUP BY c.id, cat.name, u.name
               ORDER BY {order_by}"#
        ))
        .bind(query.category.as_deref())
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(db, dto), fields(course.title = %dto.title, db.operation = "INSERT", db.table = "courses"))]
    pub async fn create(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let mut conn = db.acquire().await?;
        let course = Self::insert_course(&mut conn, &dto).await?;
        drop(conn);

        Self::notify_created(db, &course).await;
        Ok(course)
    }

    #[instrument(skip(db, dto), fields(course.id = %id, db.operation = "UPDATE", db.table = "courses"))]
    pub async fn update(db: &PgPool, id: Uuid, dto: UpdateCourseDto) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"UPDATE courses SET
                   title = COALESCE($2, title),
                   short_description = COALESCE($3, short_description),
                   detailed_description = COALESCE($4, detailed_description),
                   image_url = COALESCE($5, image_url),
                   price_original = COALESCE($6, price_original),
                   price_discounted = COALESCE($7, price_discounted),
                   status = COALESCE($8, status),
                   level = COALESCE($9, level),
                   duration = COALESCE($10, duration),
                   category_id = COALESCE($11, category_id),
                   instructor_id = COALESCE($12, instructor_id),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(id)
        .bind(dto.title.as_deref().map(str::trim))
        .bind(dto.short_description.as_deref().map(str::trim))
        .bind(dto.detailed_description.as_deref().map(str::trim))
        .bind(dto.image_url.as_deref())
        .bind(dto.price_original)
        .bind(dto.price_discounted)
        .bind(dto.status)
        .bind(dto.level)
        .bind(dto.duration.as_deref().map(str::trim))
        .bind(dto.category_id)
        .bind(dto.instructor_id)
        .fetch_optional(db)
        .await
        .map_err(map_reference_error)?
        .ok_or_else(course_not_found)
    }

    /// Creates a course and its whole curriculum atomically, then re-reads the aggregate.
    #[instrument(skip(db, dto), fields(course.title = %dto.title, db.operation = "INSERT", db.table = "courses"))]
    pub async fn create_comprehensive(
        db: &PgPool,
        dto: ComprehensiveCourseDto,
    ) -> Result<CourseDetails, AppError> {
        let (scalars, children) = dto.into_parts();

        let mut tx = db.begin().await?;
        let course = Self::insert_course(&mut tx, &scalars).await?;
        Self::insert_children(&mut tx, course.id, &children).await?;
        tx.commit().await?;

        tracing::info!(
            course.id = %course.id,
            modules = children.modules.len(),
            "Course created with curriculum"
        );

        Self::notify_created(db, &course).await;
        Self::get(db, course.id).await
    }

    /// Replaces the scalars and every child row in one transaction.
    ///
    /// Child ids never survive: all prior children are deleted before the new
    /// ones are inserted.
    #[instrument(skip(db, dto), fields(course.id = %id, db.operation = "UPDATE", db.table = "courses"))]
    pub async fn update_comprehensive(
        db: &PgPool,
        id: Uuid,
        dto: ComprehensiveCourseDto,
    ) -> Result<CourseDetails, AppError> {
        let (scalars, children) = dto.into_parts();

        let mut tx = db.begin().await?;
        Self::replace_scalars(&mut tx, id, &scalars)
            .await?
            .ok_or_else(course_not_found)?;
        Self::delete_children(&mut tx, id).await?;
        Self::insert_children(&mut tx, id, &children).await?;
        tx.commit().await?;

        Self::get(db, id).await
    }

    /// Applications still referencing the course block the delete with 409.
    #[instrument(skip(db), fields(course.id = %id, db.operation = "DELETE", db.table = "courses"))]
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        Self::ensure_exists(db, id).await?;

        let mut tx = db.begin().await?;
        Self::delete_children(&mut tx, id).await?;
        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_foreign_key_violation()
                {
                    return AppError::conflict(anyhow::anyhow!(
                        "Cannot delete course: applications still reference it"
                    ));
                }
                AppError::from(e)
            })?;
        tx.commit().await?;

        Ok(())
    }
}
