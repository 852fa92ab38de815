//! # SkillBridge Config
//!
//! Configuration types for the SkillBridge API, each loaded from environment
//! variables with sensible development defaults:
//!
//! - [`jwt`]: token signing secret and lifetimes
//! - [`cors`]: allowed browser origins
//! - [`rate_limit`]: optional throttling of the auth endpoints
//! - [`upload`]: receipt storage location and size cap
//! - [`server`]: bind address, log format and metrics toggle
//!
//! # Example
//!
//! ```ignore
//! use skillbridge_config::{CorsConfig, JwtConfig, RateLimitConfig, UploadConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env();
//! let upload_config = UploadConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod rate_limit;
pub mod server;
pub mod upload;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::{LogFormat, ServerConfig};
pub use upload::UploadConfig;

/// Reads `key` and parses it, falling back to `default` when unset or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a boolean flag. Accepts `true`/`1`/`yes` (case-insensitive).
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        Err(_) => default,
    }
}
