//! Session lifecycle HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions      - Start a session
//! - GET    /api/v1/sessions/{id} - Session summary
//! - DELETE /api/v1/sessions/{id} - Drop a session and its history

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use coachbot_core::session::{InvocationState, SessionContext};

use crate::http::error::AppError;
use crate::http::extractors::session::SessionHandle;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Session summary. Never includes the credential itself.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub state: InvocationState,
    pub has_credential: bool,
    pub temperature: f32,
    pub history_len: usize,
    pub history_capacity: usize,
    pub has_result: bool,
}

impl From<&SessionContext> for SessionView {
    fn from(session: &SessionContext) -> Self {
        Self {
            id: session.id(),
            created_at: session.created_at(),
            state: session.state(),
            has_credential: session.settings.has_credential(),
            temperature: session.settings.temperature(),
            history_len: session.history.len(),
            history_capacity: session.history.capacity(),
            has_result: session.last_result().is_some(),
        }
    }
}

fn with_session_links<T: serde::Serialize>(resp: ApiResponse<T>, id: Uuid) -> ApiResponse<T> {
    resp.with_link("self", &format!("/api/v1/sessions/{id}"))
        .with_link("settings", &format!("/api/v1/sessions/{id}/settings"))
        .with_link("generate", &format!("/api/v1/sessions/{id}/generate"))
        .with_link("history", &format!("/api/v1/sessions/{id}/history"))
}

/// POST /api/v1/sessions - Create a session with default settings.
pub async fn create_session(State(state): State<AppState>) -> ApiResponse<SessionView> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let (id, session) = state.sessions.create();
    let view = SessionView::from(&*session.lock().await);

    let elapsed = start.elapsed().as_millis() as u64;
    with_session_links(ApiResponse::success(view, request_id, elapsed), id)
        .with_status(StatusCode::CREATED)
}

/// GET /api/v1/sessions/{id} - Get a session summary.
pub async fn get_session(handle: SessionHandle) -> Json<ApiResponse<SessionView>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let view = SessionView::from(&*handle.session.lock().await);

    let elapsed = start.elapsed().as_millis() as u64;
    Json(with_session_links(
        ApiResponse::success(view, request_id, elapsed),
        handle.id,
    ))
}

/// DELETE /api/v1/sessions/{id} - Drop a session.
pub async fn delete_session(
    State(state): State<AppState>,
    handle: SessionHandle,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if !state.sessions.remove(&handle.id) {
        return Err(AppError::SessionNotFound(handle.id));
    }

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "deleted": true, "id": handle.id }),
        request_id,
        elapsed,
    )))
}
