//! Instructor and student seeding.

use fake::Fake;
use fake::faker::name::en::*;
use fake::faker::phone_number::en::PhoneNumber;
use rayon::prelude::*;
use skillbridge_models::UserRole;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;
use uuid::Uuid;

use super::models::{SEED_EMAIL_DOMAIN, UserSeed};

const EXPERTISE_POOL: [&str; 8] = [
    "Web Development",
    "Data Science",
    "Machine Learning",
    "Cloud Computing",
    "Cybersecurity",
    "UI/UX Design",
    "Mobile Development",
    "DevOps",
];

/// Generates users of one role in parallel using Rayon
pub fn generate_users(role: UserRole, count: usize, password_hash: &str) -> Vec<UserSeed> {
    let prefix = role.as_str().to_lowercase();

    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            UserSeed {
                email: format!(
                    "{}.{}+{}{}@{}",
                    first_name.to_lowercase(),
                    last_name.to_lowercase(),
                    prefix,
                    idx,
                    SEED_EMAIL_DOMAIN
                ),
                name: format!("{} {}", first_name, last_name),
                password_hash: password_hash.to_string(),
                role,
                phone: PhoneNumber().fake(),
            }
        })
        .collect()
}

/// Seeds instructors with profiles and expertise links, returning their user ids
pub async fn seed_instructors(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🧑‍🏫 Seeding {} instructors...", count);

    let users = generate_users(UserRole::Instructor, count, password_hash);
    let mut tx = db.begin().await?;

    let user_ids = insert_users_chunked(&mut tx, &users).await?;

    for (idx, (user_id, user)) in user_ids.iter().zip(users.iter()).enumerate() {
        let profile_id: Uuid = sqlx::query_scalar(
            "INSERT INTO instructor_profiles (user_id, phone, years_of_experience, bio, rating, students)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(user_id)
        .bind(&user.phone)
        .bind((1..20).fake::<i32>())
        .bind(format!("{} teaches practical, project-based courses.", user.name))
        .bind(((30..50).fake::<i32>() as f64) / 10.0)
        .bind((0..500).fake::<i32>())
        .fetch_one(&mut *tx)
        .await?;

        for name in [
            EXPERTISE_POOL[idx % EXPERTISE_POOL.len()],
            EXPERTISE_POOL[(idx + 3) % EXPERTISE_POOL.len()],
        ] {
            let expertise_id: Uuid = sqlx::query_scalar(
                "INSERT INTO expertise (name) VALUES ($1)
                 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
                 RETURNING id",
            )
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                "INSERT INTO instructor_expertise (instructor_id, expertise_id)
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(profile_id)
            .bind(expertise_id)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} instructors in {:?}",
        user_ids.len(),
        start_time.elapsed()
    );

    Ok(user_ids)
}

/// Seeds students with profiles, returning each user id alongside its seed
pub async fn seed_students(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> Result<Vec<(Uuid, UserSeed)>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let users = generate_users(UserRole::Student, count, password_hash);
    let mut tx = db.begin().await?;

    let user_ids = insert_users_chunked(&mut tx, &users).await?;

    const BATCH_SIZE: usize = 1000;
    let pairs: Vec<(Uuid, &UserSeed)> = user_ids.iter().copied().zip(users.iter()).collect();
    for chunk in pairs.chunks(BATCH_SIZE) {
        let mut query = String::from("INSERT INTO student_profiles (user_id, phone) VALUES ");
        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            query.push_str(&format!("(${}, ${})", i * 2 + 1, i * 2 + 2));
        }

        let mut q = sqlx::query(&query);
        for (user_id, user) in chunk {
            q = q.bind(user_id).bind(&user.phone);
        }
        q.execute(&mut *tx).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students in {:?}",
        user_ids.len(),
        start_time.elapsed()
    );

    Ok(user_ids.into_iter().zip(users).collect())
}

async fn insert_users_chunked(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    // 4 params per user
    const BATCH_SIZE: usize = 1000;

    let mut all_ids = Vec::with_capacity(users.len());
    for chunk in users.chunks(BATCH_SIZE) {
        all_ids.extend(insert_users_chunk(tx, chunk).await?);
    }
    Ok(all_ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO users (name, email, password_hash, role) VALUES ");

    for (i, _) in users.iter().enumerate() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 4;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4
        ));
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for user in users {
        q = q
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role);
    }

    let ids: Vec<Uuid> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}
