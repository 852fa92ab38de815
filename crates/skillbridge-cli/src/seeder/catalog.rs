//! Category and course seeding.

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence, Words};
use rayon::prelude::*;
use skillbridge_models::courses::{CourseLevel, CourseStatus};
use sqlx::PgPool;
use std::time::Instant;
use uuid::Uuid;

use super::models::{CategorySeed, CourseSeed, ModuleSeed};

/// Seeded category names carry this suffix so `clear-seed` can find them.
pub const SEED_CATEGORY_SUFFIX: &str = "(demo)";

const CATEGORY_NAMES: [&str; 10] = [
    "Programming",
    "Data & Analytics",
    "Design",
    "Business",
    "Marketing",
    "Cloud & DevOps",
    "Security",
    "Languages",
    "Finance",
    "Personal Development",
];

const LEVELS: [CourseLevel; 4] = [
    CourseLevel::Beginner,
    CourseLevel::Intermediate,
    CourseLevel::Advanced,
    CourseLevel::AllLevels,
];

pub fn generate_categories(count: usize) -> Vec<CategorySeed> {
    (0..count)
        .map(|idx| {
            let base = CATEGORY_NAMES[idx % CATEGORY_NAMES.len()];
            let round = idx / CATEGORY_NAMES.len();
            let name = if round == 0 {
                format!("{} {}", base, SEED_CATEGORY_SUFFIX)
            } else {
                format!("{} {} {}", base, round + 1, SEED_CATEGORY_SUFFIX)
            };

            CategorySeed {
                name,
                description: Sentence(6..12).fake(),
            }
        })
        .collect()
}

/// Generates courses with a small curriculum in parallel using Rayon
pub fn generate_courses(
    category_ids: &[Uuid],
    instructor_ids: &[Uuid],
    courses_per_category: usize,
) -> Vec<CourseSeed> {
    if instructor_ids.is_empty() {
        return Vec::new();
    }

    category_ids
        .par_iter()
        .enumerate()
        .flat_map(|(category_idx, &category_id)| {
            (0..courses_per_category)
                .map(|course_idx| {
                    let seq = category_idx * courses_per_category + course_idx;
                    let words: Vec<String> = Words(2..4).fake();
                    let price: f64 = (50..400).fake::<u32>() as f64 * 10.0;

                    CourseSeed {
                        title: format!("Mastering {}", capitalize_words(&words)),
                        short_description: Sentence(8..14).fake(),
                        detailed_description: Paragraph(3..5).fake(),
                        price_original: price,
                        price_discounted: (price * 0.8).round(),
                        status: if seq % 4 == 3 {
                            CourseStatus::Draft
                        } else {
                            CourseStatus::Published
                        },
                        level: LEVELS[seq % LEVELS.len()],
                        duration: format!("{} weeks", (4..13).fake::<u32>()),
                        category_id,
                        instructor_id: instructor_ids[seq % instructor_ids.len()],
                        modules: generate_modules((2..5).fake()),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn generate_modules(count: usize) -> Vec<ModuleSeed> {
    (1..=count)
        .map(|idx| ModuleSeed {
            title: format!("Module {}: {}", idx, capitalize_words(&Words(2..4).fake::<Vec<String>>())),
            duration: format!("{} hours", (2..9).fake::<u32>()),
            lessons: (0..(2..5).fake::<usize>())
                .map(|_| capitalize_words(&Words(3..6).fake::<Vec<String>>()))
                .collect(),
        })
        .collect()
}

fn capitalize_words(words: &[String]) -> String {
    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub async fn seed_categories(
    db: &PgPool,
    count: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗂️  Seeding {} categories...", count);

    let categories = generate_categories(count);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(categories.len());

    for category in &categories {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO categories (name, description) VALUES ($1, $2)
             ON CONFLICT (name) DO UPDATE SET description = EXCLUDED.description
             RETURNING id",
        )
        .bind(&category.name)
        .bind(&category.description)
        .fetch_one(&mut *tx)
        .await?;
        ids.push(id);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} categories in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Seeds courses with modules, lessons, outcomes and prerequisites.
///
/// Returns the ids of published courses.
pub async fn seed_courses(
    db: &PgPool,
    category_ids: &[Uuid],
    instructor_ids: &[Uuid],
    courses_per_category: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let courses = generate_courses(category_ids, instructor_ids, courses_per_category);
    println!("📚 Seeding {} courses...", courses.len());

    let mut tx = db.begin().await?;
    let mut published = Vec::new();

    for course in &courses {
        let course_id: Uuid = sqlx::query_scalar(
            "INSERT INTO courses (title, short_description, detailed_description, price_original,
                                  price_discounted, status, level, duration, category_id, instructor_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING id",
        )
        .bind(&course.title)
        .bind(&course.short_description)
        .bind(&course.detailed_description)
        .bind(course.price_original)
        .bind(course.price_discounted)
        .bind(course.status)
        .bind(course.level)
        .bind(&course.duration)
        .bind(course.category_id)
        .bind(course.instructor_id)
        .fetch_one(&mut *tx)
        .await?;

        for (position, module) in course.modules.iter().enumerate() {
            let module_id: Uuid = sqlx::query_scalar(
                "INSERT INTO course_modules (course_id, title, duration, sort_order)
                 VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .bind(course_id)
            .bind(&module.title)
            .bind(&module.duration)
            .bind(position as i32 + 1)
            .fetch_one(&mut *tx)
            .await?;

            for (lesson_position, lesson) in module.lessons.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO course_lessons (module_id, title, sort_order) VALUES ($1, $2, $3)",
                )
                .bind(module_id)
                .bind(lesson)
                .bind(lesson_position as i32 + 1)
                .execute(&mut *tx)
                .await?;
            }
        }

        for table in ["learning_outcomes", "prerequisites"] {
            for _ in 0..3 {
                let text: String = Sentence(4..8).fake();
                sqlx::query(&format!(
                    "INSERT INTO {} (course_id, text) VALUES ($1, $2)",
                    table
                ))
                .bind(course_id)
                .bind(text)
                .execute(&mut *tx)
                .await?;
            }
        }

        if course.status == CourseStatus::Published {
            published.push(course_id);
        }
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} courses ({} published) in {:?}",
        courses.len(),
        published.len(),
        start_time.elapsed()
    );

    Ok(published)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_are_unique_and_marked() {
        let categories = generate_categories(25);
        let mut names: Vec<_> = categories.iter().map(|c| c.name.clone()).collect();
        assert!(names.iter().all(|n| n.ends_with(SEED_CATEGORY_SUFFIX)));
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 25);
    }

    #[test]
    fn test_courses_spread_over_instructors() {
        let categories = vec![Uuid::new_v4(), Uuid::new_v4()];
        let instructors = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let courses = generate_courses(&categories, &instructors, 3);

        assert_eq!(courses.len(), 6);
        assert!(courses.iter().all(|c| instructors.contains(&c.instructor_id)));
        assert!(courses.iter().all(|c| !c.modules.is_empty()));
        assert!(courses.iter().all(|c| c.price_discounted <= c.price_original));
    }

    #[test]
    fn test_no_courses_without_instructors() {
        assert!(generate_courses(&[Uuid::new_v4()], &[], 3).is_empty());
    }

    #[test]
    fn test_capitalize_words() {
        let words = vec!["rust".to_string(), "async".to_string()];
        assert_eq!(capitalize_words(&words), "Rust Async");
    }
}
