//! Read-only aggregates for the back-office dashboard.
//!
//! Every growth metric compares the current calendar month (UTC) with the
//! previous one.

use chrono::{DateTime, Utc};
use skillbridge_core::AppError;
use sqlx::PgPool;
use tracing::instrument;

use super::model::{
    ChartPoint, DashboardStats, GrowthMetric, LabeledMetric, PopularCourse, RecentApplication,
    month_label, month_start,
};

const CHART_MONTHS: i32 = 6;
const RECENT_APPLICATIONS: i64 = 5;
const POPULAR_COURSES: i64 = 3;

/// A counted population and the timestamp it is windowed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Series {
    Students,
    Courses,
    Applications,
}

impl Series {
    fn source(self) -> &'static str {
        match self {
            Series::Students => "users WHERE role = 'STUDENT' AND status = 'ACTIVE'",
            Series::Courses => "courses WHERE status = 'PUBLISHED'",
            Series::Applications => "student_applications WHERE TRUE",
        }
    }

    fn timestamp(self) -> &'static str {
        match self {
            Series::Students | Series::Courses => "created_at",
            Series::Applications => "submitted_at",
        }
    }

    fn count_sql(self) -> String {
        let column = self.timestamp();
        format!(
            "SELECT COUNT(*) FROM {} AND ($1::timestamptz IS NULL OR {column} >= $1) AND ($2::timestamptz IS NULL OR {column} < $2)",
            self.source()
        )
    }
}

async fn count(
    db: &PgPool,
    series: Series,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<i64, AppError> {
    let total = sqlx::query_scalar(&series.count_sql())
        .bind(from)
        .bind(to)
        .fetch_one(db)
        .await?;
    Ok(total)
}

async fn growth_metric(
    db: &PgPool,
    series: Series,
    now: DateTime<Utc>,
) -> Result<GrowthMetric, AppError> {
    let this_month = month_start(now, 0);
    let last_month = month_start(now, -1);

    let value = count(db, series, None, None).await?;
    let current = count(db, series, Some(this_month), None).await?;
    let previous = count(db, series, Some(last_month), Some(this_month)).await?;

    Ok(GrowthMetric::new(value, current, previous))
}

pub struct DashboardService;

impl DashboardService {
    #[instrument(skip(db), fields(db.operation = "SELECT"))]
    pub async fn stats(db: &PgPool) -> Result<DashboardStats, AppError> {
        let now = Utc::now();

        let total_students = growth_metric(db, Series::Students, now).await?;
        let active_courses = growth_metric(db, Series::Courses, now).await?;
        let applications = growth_metric(db, Series::Applications, now).await?;

        let pending: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM student_applications WHERE status = 'PENDING'",
        )
        .fetch_one(db)
        .await?;

        let new_students = count(db, Series::Students, Some(month_start(now, 0)), None).await?;

        let total_courses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(db)
            .await?;

        let recent_applications = sqlx::query_as::<_, RecentApplication>(
            r#"SELECT a.id, COALESCE(u.name, a.full_name) AS student_name, c.title AS course_title,
                      a.status, a.submitted_at
               FROM student_applications a
               JOIN courses c ON c.id = a.course_id
               LEFT JOIN users u ON u.id = a.student_id
               ORDER BY a.submitted_at DESC
               LIMIT $1"#,
        )
        .bind(RECENT_APPLICATIONS)
        .fetch_all(db)
        .await?;

        let popular_courses = sqlx::query_as::<_, PopularCourse>(
            r#"SELECT c.id, c.title, cat.name AS category, COUNT(a.id) AS students
               FROM courses c
               JOIN categories cat ON cat.id = c.category_id
               LEFT JOIN student_applications a ON a.course_id = c.id
               WHERE c.status = 'PUBLISHED'
               GROUP BY c.id, cat.name
               ORDER BY students DESC, c.created_at DESC
               LIMIT $1"#,
        )
        .bind(POPULAR_COURSES)
        .fetch_all(db)
        .await?;

        Ok(DashboardStats {
            total_students,
            active_courses,
            applications,
            revenue: GrowthMetric {
                value: 0,
                growth: 0,
                growth_text: "Revenue tracking coming soon".to_string(),
            },
            pending_applications: LabeledMetric::new(pending, "Awaiting review"),
            new_students: LabeledMetric::new(new_students, "This month"),
            completion_rate: LabeledMetric::new(0, "Course completion"),
            total_courses: LabeledMetric::new(total_courses, "All courses"),
            recent_applications,
            popular_courses,
        })
    }

    /// Monthly counts for the last six calendar months, oldest first.
    #[instrument(skip(db), fields(db.operation = "SELECT"))]
    pub async fn charts(db: &PgPool) -> Result<Vec<ChartPoint>, AppError> {
        let now = Utc::now();
        let mut points = Vec::with_capacity(CHART_MONTHS as usize);

        for offset in (1 - CHART_MONTHS)..=0 {
            let start = month_start(now, offset);
            let end = month_start(now, offset + 1);

            points.push(ChartPoint {
                month: month_label(start),
                students: count(db, Series::Students, Some(start), Some(end)).await?,
                courses: count(db, Series::Courses, Some(start), Some(end)).await?,
                applications: count(db, Series::Applications, Some(start), Some(end)).await?,
            });
        }

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_sql_windows_on_series_timestamp() {
        let sql = Series::Applications.count_sql();
        assert!(sql.starts_with("SELECT COUNT(*) FROM student_applications WHERE TRUE"));
        assert!(sql.contains("submitted_at >= $1"));
        assert!(sql.contains("submitted_at < $2"));

        let sql = Series::Students.count_sql();
        assert!(sql.contains("role = 'STUDENT' AND status = 'ACTIVE'"));
        assert!(sql.contains("created_at >= $1"));
    }
}
