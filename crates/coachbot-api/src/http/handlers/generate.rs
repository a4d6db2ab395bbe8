//! Feature invocation handler.
//!
//! Endpoint:
//! - POST /api/v1/sessions/{id}/generate - Run a fixed plan or a custom question

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coachbot_types::error::CoachError;
use coachbot_types::feature::{FeatureId, FeatureRequest};
use coachbot_types::history::CompletionResult;
use coachbot_types::profile::Profile;

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::http::extractors::session::SessionHandle;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body naming a feature by its string id.
///
/// The id is parsed after deserialization so an unknown feature is reported
/// as `UNKNOWN_FEATURE` rather than a generic body error.
#[derive(Debug, Deserialize)]
pub struct FeatureRequestBody {
    pub feature: String,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub custom_question: Option<String>,
}

impl TryFrom<FeatureRequestBody> for FeatureRequest {
    type Error = CoachError;

    fn try_from(body: FeatureRequestBody) -> Result<Self, Self::Error> {
        Ok(FeatureRequest {
            feature: body.feature.parse::<FeatureId>()?,
            profile: body.profile,
            custom_question: body.custom_question,
        })
    }
}

/// A successful generation and where it landed in history.
#[derive(Debug, Serialize)]
pub struct GenerateView {
    #[serde(flatten)]
    pub result: CompletionResult,
    pub feature_name: &'static str,
    pub download_filename: String,
    pub history_entry_id: Option<Uuid>,
    pub history_len: usize,
}

/// POST /api/v1/sessions/{id}/generate
///
/// Holds the session lock for the whole call, so a session runs one
/// invocation at a time.
pub async fn generate(
    State(state): State<AppState>,
    handle: SessionHandle,
    ApiJson(body): ApiJson<FeatureRequestBody>,
) -> Result<Json<ApiResponse<GenerateView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let request = FeatureRequest::try_from(body)?;

    let mut session = handle.session.lock().await;
    let result = state.controller.invoke(&mut session, &request).await?;

    let entry_id = session.history.latest().map(|e| e.id);
    let view = GenerateView {
        feature_name: result.feature.label(),
        download_filename: result.download_filename(),
        history_entry_id: entry_id,
        history_len: session.history.len(),
        result,
    };

    let elapsed = start.elapsed().as_millis() as u64;
    let mut resp = ApiResponse::success(view, request_id, elapsed)
        .with_link("history", &format!("/api/v1/sessions/{}/history", handle.id))
        .with_link(
            "download",
            &format!("/api/v1/sessions/{}/result/download", handle.id),
        );
    if let Some(entry_id) = entry_id {
        resp = resp.with_link(
            "history_entry",
            &format!("/api/v1/sessions/{}/history/{entry_id}/download", handle.id),
        );
    }
    Ok(Json(resp))
}
