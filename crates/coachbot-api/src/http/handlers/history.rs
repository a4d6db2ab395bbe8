//! Session history handlers.
//!
//! Endpoints:
//! - GET    /api/v1/sessions/{id}/history                   - Newest first
//! - DELETE /api/v1/sessions/{id}/history                   - Clear history
//! - GET    /api/v1/sessions/{id}/history/{entry}/download  - Plain-text attachment
//! - GET    /api/v1/sessions/{id}/result/download           - Latest result as an attachment

use std::time::Instant;

use axum::Json;
use axum::extract::Path;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use coachbot_types::feature::FeatureId;
use coachbot_types::history::HistoryEntry;

use crate::http::error::AppError;
use crate::http::extractors::session::{SessionHandle, parse_uuid};
use crate::http::response::ApiResponse;

/// History row with its collapsed title.
#[derive(Debug, Serialize)]
pub struct HistoryEntryView {
    pub title: String,
    #[serde(flatten)]
    pub entry: HistoryEntry,
}

/// GET /api/v1/sessions/{id}/history
pub async fn list_history(handle: SessionHandle) -> Json<ApiResponse<Vec<HistoryEntryView>>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let entries = handle
        .session
        .lock()
        .await
        .history
        .list()
        .into_iter()
        .map(|entry| HistoryEntryView {
            title: entry.title(),
            entry,
        })
        .collect();

    let elapsed = start.elapsed().as_millis() as u64;
    Json(
        ApiResponse::success(entries, request_id, elapsed)
            .with_link("self", &format!("/api/v1/sessions/{}/history", handle.id)),
    )
}

/// DELETE /api/v1/sessions/{id}/history
pub async fn clear_history(handle: SessionHandle) -> Json<ApiResponse<serde_json::Value>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let cleared = handle.session.lock().await.history.clear();
    tracing::info!(session_id = %handle.id, cleared, "history cleared");

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(
        serde_json::json!({ "cleared": cleared }),
        request_id,
        elapsed,
    ))
}

/// GET /api/v1/sessions/{id}/history/{entry}/download
///
/// Returns the response text verbatim as a `coachbot_<feature>.txt` attachment.
pub async fn download_entry(
    handle: SessionHandle,
    Path((_, entry)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let entry_id = parse_uuid(&entry)?;

    let session = handle.session.lock().await;
    let entry = session
        .history
        .get(&entry_id)
        .ok_or(AppError::EntryNotFound(entry_id))?;

    Ok(text_attachment(entry.feature, entry.response_text.clone()))
}

/// GET /api/v1/sessions/{id}/result/download
///
/// The most recent successful result, independent of history, so it stays
/// downloadable after the history is cleared or the entry is evicted.
pub async fn download_last_result(handle: SessionHandle) -> Result<Response, AppError> {
    let session = handle.session.lock().await;
    let result = session
        .last_result()
        .ok_or(AppError::NoResult(handle.id))?;

    Ok(text_attachment(result.feature, result.text.clone()))
}

fn text_attachment(feature: FeatureId, text: String) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", feature.download_filename());
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        text,
    )
        .into_response()
}
