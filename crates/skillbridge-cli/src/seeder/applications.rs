//! Student application seeding.

use fake::Fake;
use fake::faker::address::en::{CityName, StreetName};
use rayon::prelude::*;
use skillbridge_models::applications::PaymentMethod;
use sqlx::PgPool;
use std::time::Instant;
use uuid::Uuid;

use super::models::{ApplicationSeed, UserSeed};

const PAYMENT_METHODS: [PaymentMethod; 4] = [
    PaymentMethod::Telebirr,
    PaymentMethod::Cbe,
    PaymentMethod::Amole,
    PaymentMethod::Other,
];

pub fn generate_applications(
    students: &[(Uuid, UserSeed)],
    course_ids: &[Uuid],
    per_student: usize,
) -> Vec<ApplicationSeed> {
    if course_ids.is_empty() {
        return Vec::new();
    }

    students
        .par_iter()
        .enumerate()
        .flat_map(|(student_idx, (student_id, student))| {
            (0..per_student)
                .map(|n| {
                    let seq = student_idx * per_student + n;
                    let street: String = StreetName().fake();
                    let city: String = CityName().fake();

                    ApplicationSeed {
                        course_id: course_ids[seq % course_ids.len()],
                        student_id: *student_id,
                        full_name: student.name.clone(),
                        email: student.email.clone(),
                        phone: student.phone.clone(),
                        gender: if seq % 2 == 0 { "Female" } else { "Male" }.to_string(),
                        address: format!("{}, {}", street, city),
                        payment_method: PAYMENT_METHODS[seq % PAYMENT_METHODS.len()],
                        payment_reference: format!("TXN{:08}", (0..100_000_000).fake::<u32>()),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_applications(
    db: &PgPool,
    students: &[(Uuid, UserSeed)],
    course_ids: &[Uuid],
    per_student: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let applications = generate_applications(students, course_ids, per_student);
    println!("📝 Seeding {} applications...", applications.len());

    let mut tx = db.begin().await?;

    // 10 params per application
    const BATCH_SIZE: usize = 500;
    let mut inserted = 0;

    for chunk in applications.chunks(BATCH_SIZE) {
        let mut query = String::from(
            "INSERT INTO student_applications (course_id, student_id, full_name, date_of_birth, gender,
                email, phone, address, payment_method, payment_reference, submitted_at) VALUES ",
        );

        for i in 0..chunk.len() {
            if i > 0 {
                query.push_str(", ");
            }
            let p = i * 10;
            query.push_str(&format!(
                "(${}, ${}, ${}, NOW() - INTERVAL '22 years', ${}, ${}, ${}, ${}, ${}, ${}, \
                 NOW() - (${} || ' days')::INTERVAL)",
                p + 1,
                p + 2,
                p + 3,
                p + 4,
                p + 5,
                p + 6,
                p + 7,
                p + 8,
                p + 9,
                p + 10
            ));
        }

        let mut q = sqlx::query(&query);
        for application in chunk {
            q = q
                .bind(application.course_id)
                .bind(application.student_id)
                .bind(&application.full_name)
                .bind(&application.gender)
                .bind(&application.email)
                .bind(&application.phone)
                .bind(&application.address)
                .bind(application.payment_method)
                .bind(&application.payment_reference)
                .bind((0..180).fake::<i32>().to_string());
        }

        inserted += q.execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} applications in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillbridge_models::UserRole;

    fn student(name: &str) -> (Uuid, UserSeed) {
        (
            Uuid::new_v4(),
            UserSeed {
                name: name.to_string(),
                email: format!("{}@seed.skillbridge.test", name.to_lowercase()),
                password_hash: "hash".to_string(),
                role: UserRole::Student,
                phone: "+251900000000".to_string(),
            },
        )
    }

    #[test]
    fn test_applications_reference_known_courses() {
        let students = vec![student("Abebe"), student("Sara")];
        let courses = vec![Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let applications = generate_applications(&students, &courses, 2);

        assert_eq!(applications.len(), 4);
        assert!(applications.iter().all(|a| courses.contains(&a.course_id)));
        assert!(applications.iter().all(|a| a.payment_reference.len() >= 3));
    }

    #[test]
    fn test_no_applications_without_courses() {
        assert!(generate_applications(&[student("Abebe")], &[], 3).is_empty());
    }
}
