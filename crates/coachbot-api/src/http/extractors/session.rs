//! Session extractor.
//!
//! Resolves the `{id}` path segment of `/sessions/{id}/...` routes to a live
//! session in the store.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use coachbot_core::session::SharedSession;

use crate::http::error::AppError;
use crate::state::AppState;

/// A live session addressed by the request path.
pub struct SessionHandle {
    pub id: Uuid,
    pub session: SharedSession,
}

impl FromRequestParts<AppState> for SessionHandle {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let raw = params
            .get("id")
            .ok_or_else(|| AppError::Validation("Missing session id".to_string()))?;
        let id = parse_uuid(raw)?;

        let session = state
            .sessions
            .get(&id)
            .ok_or(AppError::SessionNotFound(id))?;

        Ok(Self { id, session })
    }
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
pub fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}
