//! Demo data seeding.
//!
//! All seeded accounts share the password `password123` and an email under
//! [`SEED_EMAIL_DOMAIN`]; seeded categories end with [`SEED_CATEGORY_SUFFIX`].

pub mod applications;
pub mod catalog;
pub mod models;
pub mod users;

pub use catalog::SEED_CATEGORY_SUFFIX;
pub use models::{SEED_EMAIL_DOMAIN, SeedConfig};

use skillbridge_core::hash_password;
use sqlx::PgPool;
use std::time::Instant;

pub const SEED_PASSWORD: &str = "password123";

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🌱 Seeding database...\n");

    // One hash for every seeded account keeps bcrypt out of the hot loop.
    let password_hash =
        hash_password(SEED_PASSWORD).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let category_ids = catalog::seed_categories(db, config.categories).await?;
    let instructor_ids = users::seed_instructors(db, config.instructors, &password_hash).await?;
    let course_ids = catalog::seed_courses(
        db,
        &category_ids,
        &instructor_ids,
        config.courses_per_category,
    )
    .await?;
    let students = users::seed_students(db, config.students, &password_hash).await?;
    applications::seed_applications(db, &students, &course_ids, config.applications_per_student)
        .await?;

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());
    println!("   Seeded accounts use the password '{}'", SEED_PASSWORD);

    Ok(())
}

/// Removes everything the seeder created, children first.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let email_pattern = format!("%@{}", SEED_EMAIL_DOMAIN);
    let category_pattern = format!("% {}", SEED_CATEGORY_SUFFIX);

    let mut tx = db.begin().await?;

    let seeded_courses = "SELECT c.id FROM courses c
        JOIN users u ON u.id = c.instructor_id
        JOIN categories cat ON cat.id = c.category_id
        WHERE u.email LIKE $1 OR cat.name LIKE $2";

    let applications = sqlx::query(
        "DELETE FROM student_applications a
         USING users u
         WHERE u.id = a.student_id AND u.email LIKE $1",
    )
    .bind(&email_pattern)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    sqlx::query(&format!(
        "DELETE FROM student_applications WHERE course_id IN ({seeded_courses})"
    ))
    .bind(&email_pattern)
    .bind(&category_pattern)
    .execute(&mut *tx)
    .await?;

    sqlx::query(&format!(
        "DELETE FROM course_lessons WHERE module_id IN
            (SELECT id FROM course_modules WHERE course_id IN ({seeded_courses}))"
    ))
    .bind(&email_pattern)
    .bind(&category_pattern)
    .execute(&mut *tx)
    .await?;

    for table in ["course_modules", "learning_outcomes", "prerequisites"] {
        sqlx::query(&format!(
            "DELETE FROM {table} WHERE course_id IN ({seeded_courses})"
        ))
        .bind(&email_pattern)
        .bind(&category_pattern)
        .execute(&mut *tx)
        .await?;
    }

    let courses = sqlx::query(&format!("DELETE FROM courses WHERE id IN ({seeded_courses})"))
        .bind(&email_pattern)
        .bind(&category_pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let categories = sqlx::query(
        "DELETE FROM categories cat WHERE cat.name LIKE $1
         AND NOT EXISTS (SELECT 1 FROM courses c WHERE c.category_id = cat.id)",
    )
    .bind(&category_pattern)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    sqlx::query(
        "DELETE FROM instructor_expertise WHERE instructor_id IN
            (SELECT p.id FROM instructor_profiles p JOIN users u ON u.id = p.user_id WHERE u.email LIKE $1)",
    )
    .bind(&email_pattern)
    .execute(&mut *tx)
    .await?;

    for table in ["instructor_profiles", "student_profiles", "admin_profiles"] {
        sqlx::query(&format!(
            "DELETE FROM {table} p USING users u WHERE u.id = p.user_id AND u.email LIKE $1"
        ))
        .bind(&email_pattern)
        .execute(&mut *tx)
        .await?;
    }

    let users = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(&email_pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} users, {} courses, {} categories, {} applications in {:?}",
        users,
        courses,
        categories,
        applications,
        start_time.elapsed()
    );
    println!("\n✅ Seeded data cleared");

    Ok(())
}
