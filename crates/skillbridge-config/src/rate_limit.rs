//! Rate limiting for the authentication endpoints.
//!
//! Throttling is off by default and is applied only to `/api/auth` when
//! enabled. Configuration:
//!
//! - `RATE_LIMIT_ENABLED`: turn the limiter on (default: false)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: token replenishment interval in seconds (default: 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket size (default: 5)
//!
//! Clients are keyed by IP, honouring `X-Forwarded-For`/`X-Real-IP` before
//! falling back to the peer address.

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

use crate::{env_flag, env_or};

pub type AuthGovernorConfig =
    GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub auth_per_second: u64,
    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            enabled: env_flag("RATE_LIMIT_ENABLED", defaults.enabled),
            auth_per_second: env_or("RATE_LIMIT_AUTH_PER_SECOND", defaults.auth_per_second),
            auth_burst_size: env_or("RATE_LIMIT_AUTH_BURST_SIZE", defaults.auth_burst_size),
        }
    }

    /// Governor settings for the auth routes.
    ///
    /// Returns `None` when disabled or when the values are rejected by the
    /// builder (a zero period or burst).
    #[must_use]
    pub fn auth_governor_config(&self) -> Option<AuthGovernorConfig> {
        if !self.enabled {
            return None;
        }

        GovernorConfigBuilder::default()
            .per_second(self.auth_per_second)
            .burst_size(self.auth_burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.auth_per_second, 10);
        assert_eq!(config.auth_burst_size, 5);
    }

    #[test]
    fn test_disabled_yields_no_governor() {
        assert!(RateLimitConfig::default().auth_governor_config().is_none());
    }

    #[test]
    fn test_enabled_builds_governor() {
        let config = RateLimitConfig {
            enabled: true,
            ..RateLimitConfig::default()
        };
        assert!(config.auth_governor_config().is_some());
    }

    #[test]
    fn test_zero_burst_is_rejected() {
        let config = RateLimitConfig {
            enabled: true,
            auth_per_second: 10,
            auth_burst_size: 0,
        };
        assert!(config.auth_governor_config().is_none());
    }
}
