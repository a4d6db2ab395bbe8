//! Per-session settings panel handlers.
//!
//! Endpoints:
//! - GET  /api/v1/sessions/{id}/settings        - Masked credential and temperature
//! - PUT  /api/v1/sessions/{id}/settings        - Update credential and/or temperature
//! - POST /api/v1/sessions/{id}/settings/verify - Test the stored credential

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coachbot_core::session::SessionSettings;
use coachbot_infra::llm::test_provider_connection;
use coachbot_types::error::CoachError;

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::http::extractors::session::SessionHandle;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Settings as shown to the user; the credential is masked.
#[derive(Debug, Serialize)]
pub struct SettingsView {
    pub credential: Option<String>,
    pub has_credential: bool,
    pub temperature: f32,
}

impl From<&SessionSettings> for SettingsView {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            credential: settings.masked_credential(),
            has_credential: settings.has_credential(),
            temperature: settings.temperature(),
        }
    }
}

/// Request body for updating settings. Absent fields are left unchanged;
/// an empty `api_key` clears the credential.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// GET /api/v1/sessions/{id}/settings
pub async fn get_settings(handle: SessionHandle) -> Json<ApiResponse<SettingsView>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let view = SettingsView::from(&handle.session.lock().await.settings);

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(view, request_id, elapsed))
}

/// PUT /api/v1/sessions/{id}/settings
pub async fn update_settings(
    handle: SessionHandle,
    ApiJson(body): ApiJson<UpdateSettingsRequest>,
) -> Result<Json<ApiResponse<SettingsView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let mut session = handle.session.lock().await;

    // Temperature is validated first so a bad value leaves everything untouched.
    if let Some(temperature) = body.temperature {
        session.settings.set_temperature(temperature)?;
    }
    if let Some(api_key) = body.api_key {
        session.settings.set_credential(Some(api_key));
    }

    tracing::info!(
        session_id = %handle.id,
        has_credential = session.settings.has_credential(),
        temperature = session.settings.temperature(),
        "settings updated"
    );

    let view = SettingsView::from(&session.settings);
    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(view, request_id, elapsed)))
}

/// POST /api/v1/sessions/{id}/settings/verify - Send a tiny request with the key.
pub async fn verify_settings(
    State(state): State<AppState>,
    handle: SessionHandle,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session = handle.session.lock().await;
    let credential = session
        .settings
        .credential()
        .ok_or(CoachError::MissingCredential)?;

    test_provider_connection(state.controller.provider(), credential).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "valid": true, "provider": state.controller.provider().name() }),
        request_id,
        elapsed,
    )))
}
