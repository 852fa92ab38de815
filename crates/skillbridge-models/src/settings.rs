//! Platform settings, stored as one JSON document per section.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use skillbridge_core::serde::deserialize_optional_string;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A settings section persisted under [`SettingsSection::KEY`].
pub trait SettingsSection:
    Serialize + DeserializeOwned + Default + Validate + Send + Sync + Unpin + 'static
{
    /// Primary key in the `settings` table and the URL segment.
    const KEY: &'static str;
    /// Human-readable name used in response messages.
    const LABEL: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    #[validate(length(min = 1, message = "Site name is required"))]
    pub site_name: String,
    #[validate(email(message = "Valid email is required"))]
    pub contact_email: String,
    #[validate(length(min = 1, message = "Site description is required"))]
    pub site_description: String,
    #[validate(length(min = 1, message = "Contact phone is required"))]
    pub contact_phone: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            site_name: "SkillBridge".to_string(),
            contact_email: "contact@skillbridge.com".to_string(),
            site_description: "Bridging Gaps, Building Skills, Transforming Futures".to_string(),
            contact_phone: "+251 2345 4365".to_string(),
            address: "123 Education Street, Learning City".to_string(),
        }
    }
}

impl SettingsSection for GeneralSettings {
    const KEY: &'static str = "general";
    const LABEL: &'static str = "General";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettings {
    #[validate(length(min = 1, message = "SMTP host is required"))]
    pub smtp_host: String,
    #[validate(range(min = 1, max = 65535, message = "SMTP port is required"))]
    pub smtp_port: u32,
    #[validate(email(message = "Valid email is required"))]
    pub smtp_username: String,
    #[validate(length(min = 1, message = "SMTP password is required"))]
    pub smtp_password: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_username: "admin@skillbridge.com".to_string(),
            smtp_password: String::new(),
        }
    }
}

impl SettingsSection for EmailSettings {
    const KEY: &'static str = "email";
    const LABEL: &'static str = "Email";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySettings {
    pub allow_user_registration: bool,
    pub require_email_verification: bool,
    pub enable_notifications: bool,
    pub maintenance_mode: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            allow_user_registration: true,
            require_email_verification: true,
            enable_notifications: true,
            maintenance_mode: false,
        }
    }
}

impl SettingsSection for SecuritySettings {
    const KEY: &'static str = "security";
    const LABEL: &'static str = "Security";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialSettings {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "Invalid Facebook URL"))]
    pub facebook_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "Invalid Twitter URL"))]
    pub twitter_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "Invalid LinkedIn URL"))]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "Invalid Instagram URL"))]
    pub instagram_url: Option<String>,
}

impl Default for SocialSettings {
    fn default() -> Self {
        Self {
            facebook_url: Some("https://facebook.com/yourpage".to_string()),
            twitter_url: Some("https://twitter.com/yourhandle".to_string()),
            linkedin_url: Some("https://linkedin.com/company/yourcompany".to_string()),
            instagram_url: Some("https://instagram.com/yourhandle".to_string()),
        }
    }
}

impl SettingsSection for SocialSettings {
    const KEY: &'static str = "social";
    const LABEL: &'static str = "Social";
}

const LOG_LEVELS: [&str; 4] = ["error", "warn", "info", "debug"];

fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(ValidationError::new("log_level")
            .with_message("Log level must be one of error, warn, info, debug".into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSettings {
    pub debug_mode: bool,
    #[validate(custom(function = "validate_log_level"))]
    pub log_level: String,
    pub cache_enabled: bool,
    #[validate(range(min = 1, message = "Max upload size must be at least 1 byte"))]
    pub max_upload_size: i64,
    #[validate(range(min = 60, message = "Session timeout must be at least 60 seconds"))]
    pub session_timeout: i64,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            debug_mode: false,
            log_level: "info".to_string(),
            cache_enabled: true,
            max_upload_size: 5_242_880,
            session_timeout: 3600,
        }
    }
}

impl SettingsSection for AdvancedSettings {
    const KEY: &'static str = "advanced";
    const LABEL: &'static str = "Advanced";
}
