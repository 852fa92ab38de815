use std::sync::LazyLock;

use skillbridge_auth::{create_access_token, create_token_pair, verify_refresh_token};
use skillbridge_config::JwtConfig;
use skillbridge_core::{AppError, hash_password, verify_password};
use skillbridge_models::normalize_email;
use skillbridge_models::notifications::NotificationType;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use super::model::{
    AdminProfile, InstructorProfile, LoginRequest, LoginResponse, Profile, RefreshResponse,
    RegisterRequest, RegisterResponse, StudentProfile, StudentRegisterRequest, User,
    UserCredentials, UserRole, UserStatus, UserSummary, UserWithProfile,
};
use crate::metrics::{track_login, track_user_registered};
use crate::modules::instructors::service::InstructorService;
use crate::modules::notifications::NotificationService;

/// Verified against when the email is unknown, so both paths pay for one bcrypt check.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("skillbridge-timing-placeholder").unwrap_or_default());

const USER_COLUMNS: &str = "id, name, email, role, status, created_at, updated_at";

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials")
}

fn user_exists() -> AppError {
    AppError::conflict(anyhow::anyhow!("User already exists"))
}

pub struct AuthService;

impl AuthService {
    /// Inserts a user row inside `tx`, mapping a unique-email race to 409.
    pub(crate) async fn insert_user(
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
        status: UserStatus,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password)?;

        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email, password_hash, role, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(name.trim())
        .bind(email)
        .bind(&password_hash)
        .bind(role)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return user_exists();
            }
            AppError::from(e)
        })
    }

    pub(crate) async fn email_taken(db: &PgPool, email: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = $1)")
            .bind(email)
            .fetch_one(db)
            .await?;
        Ok(exists)
    }

    #[instrument(skip(db, dto), fields(user.email = %dto.email, db.operation = "INSERT", db.table = "users"))]
    pub async fn register(db: &PgPool, dto: RegisterRequest) -> Result<RegisterResponse, AppError> {
        let email = normalize_email(&dto.email);
        if Self::email_taken(db, &email).await? {
            return Err(user_exists());
        }

        let role = dto.role.unwrap_or(UserRole::Admin);

        let mut tx = db.begin().await?;
        let user =
            Self::insert_user(&mut tx, &dto.name, &email, &dto.password, role, UserStatus::Active)
                .await?;

        sqlx::query("INSERT INTO admin_profiles (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        track_user_registered(role.as_str());
        tracing::info!(user.id = %user.id, user.role = %role, "Admin user registered");

        Ok(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserSummary::from(&user),
        })
    }

    #[instrument(skip(db, dto), fields(user.email = %dto.email, db.operation = "INSERT", db.table = "users"))]
    pub async fn register_student(
        db: &PgPool,
        dto: StudentRegisterRequest,
    ) -> Result<RegisterResponse, AppError> {
        let email = normalize_email(&dto.email);
        if Self::email_taken(db, &email).await? {
            return Err(user_exists());
        }

        let mut tx = db.begin().await?;
        let user = Self::insert_user(
            &mut tx,
            &dto.name,
            &email,
            &dto.password,
            UserRole::Student,
            UserStatus::Active,
        )
        .await?;

        sqlx::query("INSERT INTO student_profiles (user_id, phone, date_of_birth) VALUES ($1, $2, $3)")
            .bind(user.id)
            .bind(dto.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()))
            .bind(dto.date_of_birth)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        track_user_registered(UserRole::Student.as_str());
        NotificationService::notify(
            db,
            NotificationType::NewStudent,
            "New Student Registration",
            &format!("{} ({}) has registered as a student", user.name, user.email),
        )
        .await;

        Ok(RegisterResponse {
            message: "Student registered successfully".to_string(),
            user: UserSummary::from(&user),
        })
    }

    /// Verifies credentials and issues an access/refresh token pair.
    ///
    /// Unknown email, wrong password, inactive account and (with
    /// `students_only`) a non-student account all yield the same 401.
    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email, db.operation = "SELECT", db.table = "users"))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
        students_only: bool,
    ) -> Result<LoginResponse, AppError> {
        let email = normalize_email(&dto.email);

        let credentials = sqlx::query_as::<_, UserCredentials>(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE LOWER(email) = $1"
        ))
        .bind(&email)
        .fetch_optional(db)
        .await?;

        let Some(credentials) = credentials else {
            let _ = verify_password(&dto.password, &DUMMY_HASH);
            track_login("unknown", false);
            return Err(invalid_credentials());
        };

        let password_ok = verify_password(&dto.password, &credentials.password_hash)?;
        let user = credentials.user;

        if !password_ok
            || user.status != UserStatus::Active
            || (students_only && user.role != UserRole::Student)
        {
            track_login(user.role.as_str(), false);
            return Err(invalid_credentials());
        }

        let tokens = create_token_pair(user.id, &user.email, user.role, jwt_config)?;
        let profile = Self::load_profile(db, &user).await?;

        track_login(user.role.as_str(), true);

        Ok(LoginResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user: UserWithProfile::new(user, profile),
        })
    }

    /// Issues a fresh access token; the refresh token itself is not rotated.
    #[instrument(skip_all)]
    pub fn refresh(refresh_token: &str, jwt_config: &JwtConfig) -> Result<RefreshResponse, AppError> {
        let claims = verify_refresh_token(refresh_token, jwt_config)?;
        let access_token = create_access_token(claims.sub, &claims.email, claims.role, jwt_config)?;
        Ok(RefreshResponse { access_token })
    }

    #[instrument(skip(db), fields(user.id = %user_id, db.operation = "SELECT", db.table = "users"))]
    pub async fn me(db: &PgPool, user_id: Uuid) -> Result<UserWithProfile, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        let profile = Self::load_profile(db, &user).await?;
        Ok(UserWithProfile::new(user, profile))
    }

    /// Loads the profile matching the user's role.
    pub async fn load_profile(db: &PgPool, user: &User) -> Result<Option<Profile>, AppError> {
        let profile = match user.role {
            UserRole::SuperAdmin | UserRole::Admin | UserRole::Support => {
                sqlx::query_as::<_, AdminProfile>(
                    "SELECT id, user_id, department, created_at FROM admin_profiles WHERE user_id = $1",
                )
                .bind(user.id)
                .fetch_optional(db)
                .await?
                .map(Profile::Admin)
            }
            UserRole::Instructor => {
                let profile = sqlx::query_as::<_, InstructorProfile>(
                    r#"SELECT id, user_id, phone, years_of_experience, bio, status, rating, students,
                              created_at, updated_at
                       FROM instructor_profiles WHERE user_id = $1"#,
                )
                .bind(user.id)
                .fetch_optional(db)
                .await?;

                match profile {
                    Some(mut profile) => {
                        profile.expertise = InstructorService::expertise_names(db, profile.id).await?;
                        Some(Profile::Instructor(profile))
                    }
                    None => None,
                }
            }
            UserRole::Student => sqlx::query_as::<_, StudentProfile>(
                "SELECT id, user_id, phone, date_of_birth, created_at FROM student_profiles WHERE user_id = $1",
            )
            .bind(user.id)
            .fetch_optional(db)
            .await?
            .map(Profile::Student),
        };

        Ok(profile)
    }
}
