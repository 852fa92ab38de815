//! Seed records and seeding configuration.

use skillbridge_models::applications::PaymentMethod;
use skillbridge_models::courses::{CourseLevel, CourseStatus};
use skillbridge_models::UserRole;
use uuid::Uuid;

/// Every seeded account uses this domain so `clear-seed` can find them.
pub const SEED_EMAIL_DOMAIN: &str = "seed.skillbridge.test";

/// Seed data for creating a user with its role profile.
pub struct UserSeed {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub phone: String,
}

pub struct CategorySeed {
    pub name: String,
    pub description: String,
}

pub struct CourseSeed {
    pub title: String,
    pub short_description: String,
    pub detailed_description: String,
    pub price_original: f64,
    pub price_discounted: f64,
    pub status: CourseStatus,
    pub level: CourseLevel,
    pub duration: String,
    pub category_id: Uuid,
    pub instructor_id: Uuid,
    pub modules: Vec<ModuleSeed>,
}

pub struct ModuleSeed {
    pub title: String,
    pub duration: String,
    pub lessons: Vec<String>,
}

pub struct ApplicationSeed {
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub payment_reference: String,
}

/// Complete configuration for database seeding.
#[derive(Clone)]
pub struct SeedConfig {
    pub categories: usize,
    pub instructors: usize,
    pub courses_per_category: usize,
    pub students: usize,
    pub applications_per_student: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            categories: 6,
            instructors: 5,
            courses_per_category: 4,
            students: 50,
            applications_per_student: 1,
        }
    }
}

impl SeedConfig {
    pub fn new(categories: usize) -> Self {
        Self {
            categories,
            ..Default::default()
        }
    }

    pub fn with_instructors(mut self, instructors: usize) -> Self {
        self.instructors = instructors;
        self
    }

    pub fn with_courses_per_category(mut self, courses: usize) -> Self {
        self.courses_per_category = courses;
        self
    }

    pub fn with_students(mut self, students: usize, applications_per_student: usize) -> Self {
        self.students = students;
        self.applications_per_student = applications_per_student;
        self
    }

    pub fn total_courses(&self) -> usize {
        self.categories * self.courses_per_category
    }

    pub fn total_applications(&self) -> usize {
        self.students * self.applications_per_student
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_totals() {
        let config = SeedConfig::new(3)
            .with_courses_per_category(2)
            .with_students(10, 2);
        assert_eq!(config.total_courses(), 6);
        assert_eq!(config.total_applications(), 20);
        assert_eq!(config.instructors, 5);
    }
}
