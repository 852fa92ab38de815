//! Dashboard statistics and month-over-month growth.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::applications::ApplicationStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrowthMetric {
    pub value: i64,
    pub growth: i64,
    pub growth_text: String,
}

impl GrowthMetric {
    /// Metric whose growth compares this month's count with last month's.
    pub fn new(value: i64, current: i64, previous: i64) -> Self {
        let growth = growth_percent(current, previous);
        Self {
            value,
            growth,
            growth_text: growth_text(growth),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct LabeledMetric {
    pub value: i64,
    pub label: String,
}

impl LabeledMetric {
    pub fn new(value: i64, label: &str) -> Self {
        Self {
            value,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentApplication {
    pub id: Uuid,
    pub student_name: String,
    pub course_title: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PopularCourse {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub students: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: GrowthMetric,
    pub active_courses: GrowthMetric,
    pub applications: GrowthMetric,
    pub revenue: GrowthMetric,
    pub pending_applications: LabeledMetric,
    pub new_students: LabeledMetric,
    pub completion_rate: LabeledMetric,
    pub total_courses: LabeledMetric,
    pub recent_applications: Vec<RecentApplication>,
    pub popular_courses: Vec<PopularCourse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChartPoint {
    pub month: String,
    pub students: i64,
    pub courses: i64,
    pub applications: i64,
}

/// Percentage change from `previous` to `current`, rounded half up.
///
/// A rise from zero counts as 100%; zero to zero is 0%.
pub fn growth_percent(current: i64, previous: i64) -> i64 {
    if previous > 0 {
        let ratio = (current - previous) as f64 / previous as f64 * 100.0;
        (ratio + 0.5).floor() as i64
    } else if current > 0 {
        100
    } else {
        0
    }
}

pub fn growth_text(growth: i64) -> String {
    let sign = if growth >= 0 { "+" } else { "" };
    format!("{sign}{growth}% from last month")
}

/// First instant of the month `offset` months away from the month containing `now`.
pub fn month_start(now: DateTime<Utc>, offset: i32) -> DateTime<Utc> {
    let months = now.year() * 12 + now.month0() as i32 + offset;
    let (year, month0) = (months.div_euclid(12), months.rem_euclid(12) as u32);
    let date = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(NaiveDate::MIN);
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// Label such as `Oct 2026`.
pub fn month_label(start: DateTime<Utc>) -> String {
    start.format("%b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_both_zero() {
        assert_eq!(growth_percent(0, 0), 0);
    }

    #[test]
    fn test_growth_from_zero() {
        assert_eq!(growth_percent(7, 0), 100);
    }

    #[test]
    fn test_growth_rounding() {
        assert_eq!(growth_percent(15, 10), 50);
        assert_eq!(growth_percent(1, 3), -67);
        assert_eq!(growth_percent(2, 3), -33);
        assert_eq!(growth_percent(0, 4), -100);
    }

    #[test]
    fn test_growth_text_sign() {
        assert_eq!(growth_text(25), "+25% from last month");
        assert_eq!(growth_text(0), "+0% from last month");
        assert_eq!(growth_text(-10), "-10% from last month");
    }

    #[test]
    fn test_month_start_crosses_year() {
        let now = Utc.with_ymd_and_hms(2026, 2, 14, 10, 30, 0).unwrap();
        assert_eq!(
            month_start(now, 0),
            Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            month_start(now, -3),
            Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            month_start(now, 1),
            Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_month_label() {
        let start = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        assert_eq!(month_label(start), "Oct 2026");
    }

    #[test]
    fn test_metric_serializes_camel_case() {
        let json = serde_json::to_value(GrowthMetric::new(42, 3, 2)).unwrap();
        assert_eq!(json["value"], 42);
        assert_eq!(json["growth"], 50);
        assert_eq!(json["growthText"], "+50% from last month");
    }
}
