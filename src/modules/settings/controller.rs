//! One GET / PUT / reset triple per settings section.

use axum::{Json, extract::State};
use skillbridge_core::AppError;

use crate::modules::settings::model::{
    AdvancedSettings, EmailSettings, GeneralSettings, SecuritySettings, SettingsSection,
    SocialSettings, SuccessResponse,
};
use crate::modules::settings::service::SettingsService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

async fn get_section<S: SettingsSection>(state: &AppState) -> Result<Json<SuccessResponse<S>>, AppError> {
    let settings = SettingsService::get::<S>(&state.db).await?;
    Ok(Json(SuccessResponse::data(settings)))
}

async fn update_section<S: SettingsSection>(
    state: &AppState,
    settings: S,
) -> Result<Json<SuccessResponse<S>>, AppError> {
    let settings = SettingsService::save(&state.db, settings).await?;
    Ok(Json(SuccessResponse::message_with(
        format!("{} settings updated successfully", S::LABEL),
        settings,
    )))
}

async fn reset_section<S: SettingsSection>(state: &AppState) -> Result<Json<SuccessResponse<S>>, AppError> {
    let settings = SettingsService::reset::<S>(&state.db).await?;
    Ok(Json(SuccessResponse::message_with(
        format!("{} settings reset to defaults", S::LABEL),
        settings,
    )))
}

macro_rules! settings_handlers {
    ($settings:ty, $get:ident, $update:ident, $reset:ident, $path:tt, $reset_path:tt) => {
        #[utoipa::path(
            get,
            path = $path,
            responses(
                (status = 200, description = "Current settings", body = $settings),
                (status = 403, description = "Forbidden - admin tier only")
            ),
            tag = "Settings",
            security(("bearer_auth" = []))
        )]
        #[tracing::instrument(skip(state))]
        pub async fn $get(
            State(state): State<AppState>,
        ) -> Result<Json<SuccessResponse<$settings>>, AppError> {
            get_section::<$settings>(&state).await
        }

        #[utoipa::path(
            put,
            path = $path,
            request_body = $settings,
            responses(
                (status = 200, description = "Settings updated", body = $settings),
                (status = 400, description = "Invalid settings")
            ),
            tag = "Settings",
            security(("bearer_auth" = []))
        )]
        #[tracing::instrument(skip(state, settings))]
        pub async fn $update(
            State(state): State<AppState>,
            ValidatedJson(settings): ValidatedJson<$settings>,
        ) -> Result<Json<SuccessResponse<$settings>>, AppError> {
            update_section(&state, settings).await
        }

        #[utoipa::path(
            post,
            path = $reset_path,
            responses((status = 200, description = "Settings restored to defaults", body = $settings)),
            tag = "Settings",
            security(("bearer_auth" = []))
        )]
        #[tracing::instrument(skip(state))]
        pub async fn $reset(
            State(state): State<AppState>,
        ) -> Result<Json<SuccessResponse<$settings>>, AppError> {
            reset_section::<$settings>(&state).await
        }
    };
}

settings_handlers!(
    GeneralSettings,
    get_general_settings,
    update_general_settings,
    reset_general_settings,
    "/api/settings/general",
    "/api/settings/general/reset"
);
settings_handlers!(
    EmailSettings,
    get_email_settings,
    update_email_settings,
    reset_email_settings,
    "/api/settings/email",
    "/api/settings/email/reset"
);
settings_handlers!(
    SecuritySettings,
    get_security_settings,
    update_security_settings,
    reset_security_settings,
    "/api/settings/security",
    "/api/settings/security/reset"
);
settings_handlers!(
    SocialSettings,
    get_social_settings,
    update_social_settings,
    reset_social_settings,
    "/api/settings/social",
    "/api/settings/social/reset"
);
settings_handlers!(
    AdvancedSettings,
    get_advanced_settings,
    update_advanced_settings,
    reset_advanced_settings,
    "/api/settings/advanced",
    "/api/settings/advanced/reset"
);
