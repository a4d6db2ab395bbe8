//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use coachbot_types::error::CoachError;
use coachbot_types::llm::LlmError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from a feature invocation or its inputs.
    Coach(CoachError),
    /// No live session with this id.
    SessionNotFound(Uuid),
    /// No history entry with this id in the session.
    EntryNotFound(Uuid),
    /// The session has not produced a result yet.
    NoResult(Uuid),
    /// Malformed request (bad path parameter, etc.).
    Validation(String),
}

impl From<CoachError> for AppError {
    fn from(e: CoachError) -> Self {
        AppError::Coach(e)
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Coach(CoachError::Completion(e))
    }
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Coach(CoachError::UnknownFeature(_)) => {
                (StatusCode::BAD_REQUEST, "UNKNOWN_FEATURE")
            }
            AppError::Coach(CoachError::MissingCredential) => {
                (StatusCode::BAD_REQUEST, "MISSING_CREDENTIAL")
            }
            AppError::Coach(CoachError::EmptyQuery) => (StatusCode::BAD_REQUEST, "EMPTY_QUERY"),
            AppError::Coach(CoachError::InvalidProfile(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_PROFILE")
            }
            AppError::Coach(CoachError::InvalidSetting(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_SETTING")
            }
            AppError::Coach(CoachError::Completion(LlmError::Authentication(_))) => {
                (StatusCode::UNAUTHORIZED, "AUTH_FAILED")
            }
            AppError::Coach(CoachError::Completion(LlmError::Network(_))) => {
                (StatusCode::BAD_GATEWAY, "NETWORK_ERROR")
            }
            AppError::Coach(CoachError::Completion(LlmError::Upstream { .. })) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            }
            AppError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            AppError::EntryNotFound(_) => (StatusCode::NOT_FOUND, "HISTORY_ENTRY_NOT_FOUND"),
            AppError::NoResult(_) => (StatusCode::NOT_FOUND, "NO_RESULT"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Coach(e) => e.to_string(),
            AppError::SessionNotFound(id) => format!("Session {id} not found"),
            AppError::EntryNotFound(id) => format!("History entry {id} not found"),
            AppError::NoResult(id) => format!("Session {id} has no result yet"),
            AppError::Validation(msg) => msg.clone(),
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Coach(e) => e.hint(),
            AppError::SessionNotFound(_) => Some("Create a new session with POST /api/v1/sessions"),
            AppError::NoResult(_) => Some("Generate a plan first"),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::warn!(code, error = %self.message(), "request failed upstream");
        } else {
            tracing::debug!(code, error = %self.message(), "request rejected");
        }
        ApiResponse::error(status, code, self.message(), self.hint()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::from(CoachError::MissingCredential), StatusCode::BAD_REQUEST),
            (AppError::from(CoachError::EmptyQuery), StatusCode::BAD_REQUEST),
            (
                AppError::from(LlmError::Authentication("bad key".into())),
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::from(LlmError::Network("reset".into())), StatusCode::BAD_GATEWAY),
            (
                AppError::from(LlmError::Upstream {
                    status: Some(500),
                    message: "boom".into(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::SessionNotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (AppError::NoResult(Uuid::nil()), StatusCode::NOT_FOUND),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status_and_code().0, expected, "{err:?}");
        }
    }

    #[test]
    fn test_completion_errors_carry_hint() {
        let err = AppError::from(LlmError::Network("reset".into()));
        assert_eq!(err.hint(), Some("Check API key and try again"));
        assert_eq!(err.status_and_code().1, "NETWORK_ERROR");
    }
}
