use std::sync::Arc;

use skillbridge_config::{CorsConfig, JwtConfig, RateLimitConfig, UploadConfig};
use skillbridge_core::file_storage::{FileStorage, LocalFileStorage};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub upload_config: UploadConfig,
    pub storage: Arc<dyn FileStorage>,
}

impl AppState {
    /// Builds state from environment configuration around an existing pool.
    pub fn from_env(db: PgPool) -> Self {
        Self::new(
            db,
            JwtConfig::from_env(),
            CorsConfig::from_env(),
            RateLimitConfig::from_env(),
            UploadConfig::from_env(),
        )
    }

    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
        upload_config: UploadConfig,
    ) -> Self {
        let storage = LocalFileStorage::new(
            upload_config.dir.clone(),
            upload_config.base_url.clone(),
            upload_config.max_size,
        );

        Self {
            db,
            jwt_config,
            cors_config,
            rate_limit_config,
            upload_config,
            storage: Arc::new(storage),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cors_config", &self.cors_config)
            .field("rate_limit_config", &self.rate_limit_config)
            .field("upload_config", &self.upload_config)
            .finish_non_exhaustive()
    }
}
