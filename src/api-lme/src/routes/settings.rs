use axum::Json;
use axum::extract::State;

use core_lme::export::Settings;

use crate::AppState;
use crate::errors::AppError;

/// GET /api/settings - Current settings with defaults applied
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, AppError> {
    Ok(Json(Settings::load(&state.settings_path)?))
}

#[derive(Debug, serde::Serialize)]
pub struct SaveResponse {
    pub success: bool,
}

/// POST /api/settings - Persist settings, whole-document replace
pub async fn post_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<SaveResponse>, AppError> {
    settings.save(&state.settings_path)?;
    tracing::debug!("settings saved to {:?}", state.settings_path);
    Ok(Json(SaveResponse { success: true }))
}
