//! Case-insensitive substring search over applications, students and courses.
//!
//! A blank term is rejected by the cross-entity searches and means "no text
//! filter" on the paginated per-entity endpoints.

use anyhow::anyhow;
use skillbridge_core::{AppError, PageMeta, PageParams};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    ApplicationHit, ApplicationSearchQuery, ApplicationSearchResponse, ApplicationStatus,
    CourseHit, CourseSearchQuery, CourseSearchResponse, CourseStatus, QuickSearchQuery,
    QuickSearchResponse, SearchQuery, SearchResponse, SearchResults, SearchSummary, StudentHit,
    StudentSearchQuery, StudentSearchResponse, like_pattern,
};

const DEFAULT_SEARCH_LIMIT: i64 = 10;
const DEFAULT_QUICK_LIMIT: i64 = 5;
const DEFAULT_PAGE_SIZE: i64 = 20;

const APPLICATION_FROM: &str = r#"FROM student_applications a
    JOIN courses c ON c.id = a.course_id
    JOIN categories cat ON cat.id = c.category_id
    LEFT JOIN users u ON u.id = a.student_id
    WHERE ($1::text IS NULL
           OR a.full_name ILIKE $1 OR a.email ILIKE $1 OR a.phone ILIKE $1
           OR a.payment_reference ILIKE $1 OR a.university ILIKE $1
           OR a.telegram_handle ILIKE $1 OR a.address ILIKE $1 OR c.title ILIKE $1)
      AND ($2::application_status IS NULL OR a.status = $2)"#;

const STUDENT_FROM: &str = r#"FROM users u
    LEFT JOIN student_profiles sp ON sp.user_id = u.id
    WHERE u.role = 'STUDENT'
      AND ($1::text IS NULL OR u.name ILIKE $1 OR u.email ILIKE $1)"#;

const COURSE_FROM: &str = r#"FROM courses c
    JOIN categories cat ON cat.id = c.category_id
    JOIN users i ON i.id = c.instructor_id
    WHERE ($1::text IS NULL
           OR c.title ILIKE $1 OR c.short_description ILIKE $1 OR c.detailed_description ILIKE $1
           OR cat.name ILIKE $1 OR i.name ILIKE $1 OR i.email ILIKE $1)
      AND ($2::course_status IS NULL OR c.status = $2)
      AND ($3::uuid IS NULL OR c.category_id = $3)"#;

/// `%term%` for a non-blank term, otherwise a 400.
fn required_pattern(term: &str) -> Result<String, AppError> {
    if term.trim().is_empty() {
        return Err(AppError::bad_request(anyhow!("Search query is required")));
    }
    Ok(like_pattern(term))
}

fn optional_pattern(term: &str) -> Option<String> {
    (!term.trim().is_empty()).then(|| like_pattern(term))
}

fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    PageParams { page: None, limit }.limit_or(default)
}

async fn find_applications(
    db: &PgPool,
    pattern: Option<&str>,
    status: Option<ApplicationStatus>,
    limit: i64,
    offset: i64,
) -> Result<Vec<ApplicationHit>, AppError> {
    let hits = sqlx::query_as::<_, ApplicationHit>(&format!(
        r#"SELECT a.id, a.full_name, a.email, a.phone, a.payment_reference, a.status, a.submitted_at,
                  a.course_id, c.title AS course_title, cat.name AS category_name, a.student_id,
                  COALESCE(u.name, a.full_name) AS student_name,
                  COALESCE(u.email, a.email) AS student_email
           {APPLICATION_FROM}
           ORDER BY a.submitted_at DESC
           LIMIT $3 OFFSET $4"#
    ))
    .bind(pattern)
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(hits)
}

async fn find_students(
    db: &PgPool,
    pattern: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<StudentHit>, AppError> {
    let hits = sqlx::query_as::<_, StudentHit>(&format!(
        r#"SELECT u.id, u.name, u.email, u.status, sp.phone,
                  (SELECT COUNT(*) FROM student_applications sa WHERE sa.student_id = u.id) AS application_count,
                  u.created_at
           {STUDENT_FROM}
           ORDER BY u.created_at DESC
           LIMIT $2 OFFSET $3"#
    ))
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(hits)
}

async fn find_courses(
    db: &PgPool,
    pattern: Option<&str>,
    status: Option<CourseStatus>,
    category: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<CourseHit>, AppError> {
    let hits = sqlx::query_as::<_, CourseHit>(&format!(
        r#"SELECT c.id, c.title, c.short_description, c.status, c.level,
                  c.price_original, c.price_discounted, c.category_id, cat.name AS category_name,
                  c.instructor_id, i.name AS instructor_name, i.email AS instructor_email,
                  (SELECT COUNT(*) FROM student_applications sa WHERE sa.course_id = c.id) AS application_count,
                  c.created_at
           {COURSE_FROM}
           ORDER BY c.created_at DESC
           LIMIT $4 OFFSET $5"#
    ))
    .bind(pattern)
    .bind(status)
    .bind(category)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(hits)
}

async fn across_entities(
    db: &PgPool,
    pattern: &str,
    query: &SearchQuery,
    limit: i64,
) -> Result<SearchResults, AppError> {
    let mut results = SearchResults::default();

    if query.kind.includes_applications() {
        results.applications = find_applications(db, Some(pattern), None, limit, 0).await?;
    }
    if query.kind.includes_students() {
        results.students = find_students(db, Some(pattern), limit, 0).await?;
    }
    if query.kind.includes_courses() {
        results.courses = find_courses(db, Some(pattern), None, None, limit, 0).await?;
    }

    Ok(results)
}

pub struct SearchService;

impl SearchService {
    #[instrument(skip(db), fields(db.operation = "SELECT"))]
    pub async fn search(db: &PgPool, query: SearchQuery) -> Result<SearchResponse, AppError> {
        let pattern = required_pattern(&query.query)?;
        let limit = clamp_limit(query.limit, DEFAULT_SEARCH_LIMIT);

        let mut results = across_entities(db, &pattern, &query, limit).await?;
        let summary = SearchSummary::of(&results);
        results.total_results = Some(summary.total);

        Ok(SearchResponse {
            success: true,
            query: query.query.trim().to_string(),
            kind: query.kind,
            results,
            summary,
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT"))]
    pub async fn quick(db: &PgPool, query: QuickSearchQuery) -> Result<QuickSearchResponse, AppError> {
        let pattern = required_pattern(&query.query)?;
        let limit = clamp_limit(query.limit, DEFAULT_QUICK_LIMIT);

        let all = SearchQuery {
            query: query.query.clone(),
            ..SearchQuery::default()
        };
        let mut results = across_entities(db, &pattern, &all, limit).await?;
        let summary = SearchSummary::of(&results);
        results.total_results = Some(summary.total);

        Ok(QuickSearchResponse {
            success: true,
            query: query.query.trim().to_string(),
            has_more: summary.total as i64 >= limit,
            results,
            summary,
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "student_applications"))]
    pub async fn applications(
        db: &PgPool,
        query: ApplicationSearchQuery,
    ) -> Result<ApplicationSearchResponse, AppError> {
        let params = PageParams {
            page: query.page,
            limit: query.limit,
        };
        let (page, limit) = (params.page(), params.limit_or(DEFAULT_PAGE_SIZE));
        let pattern = optional_pattern(&query.query);

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {APPLICATION_FROM}"))
            .bind(pattern.as_deref())
            .bind(query.status)
            .fetch_one(db)
            .await?;

        let applications =
            find_applications(db, pattern.as_deref(), query.status, limit, params.offset(limit))
                .await?;

        Ok(ApplicationSearchResponse {
            success: true,
            applications,
            pagination: PageMeta::new(page, limit, total),
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn students(
        db: &PgPool,
        query: StudentSearchQuery,
    ) -> Result<StudentSearchResponse, AppError> {
        let params = PageParams {
            page: query.page,
            limit: query.limit,
        };
        let (page, limit) = (params.page(), params.limit_or(DEFAULT_PAGE_SIZE));
        let pattern = optional_pattern(&query.query);

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {STUDENT_FROM}"))
            .bind(pattern.as_deref())
            .fetch_one(db)
            .await?;

        let students = find_students(db, pattern.as_deref(), limit, params.offset(limit)).await?;

        Ok(StudentSearchResponse {
            success: true,
            students,
            pagination: PageMeta::new(page, limit, total),
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn courses(db: &PgPool, query: CourseSearchQuery) -> Result<CourseSearchResponse, AppError> {
        let params = PageParams {
            page: query.page,
            limit: query.limit,
        };
        let (page, limit) = (params.page(), params.limit_or(DEFAULT_PAGE_SIZE));
        let pattern = optional_pattern(&query.query);

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {COURSE_FROM}"))
            .bind(pattern.as_deref())
            .bind(query.status)
            .bind(query.category)
            .fetch_one(db)
            .await?;

        let courses = find_courses(
            db,
            pattern.as_deref(),
            query.status,
            query.category,
            limit,
            params.offset(limit),
        )
        .await?;

        Ok(CourseSearchResponse {
            success: true,
            courses,
            pagination: PageMeta::new(page, limit, total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_term_is_rejected() {
        let err = required_pattern("   ").unwrap_err();
        assert_eq!(err.error.to_string(), "Search query is required");
        assert_eq!(required_pattern("ada").unwrap(), "%ada%");
    }

    #[test]
    fn test_blank_term_means_no_filter() {
        assert_eq!(optional_pattern(""), None);
        assert_eq!(optional_pattern(" go ").as_deref(), Some("%go%"));
    }

    #[test]
    fn test_limit_clamped() {
        assert_eq!(clamp_limit(None, 5), 5);
        assert_eq!(clamp_limit(Some(0), 5), 1);
        assert_eq!(clamp_limit(Some(1000), 5), 100);
    }
}
