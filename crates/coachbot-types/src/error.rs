use thiserror::Error;

use crate::llm::LlmError;

/// Errors surfaced by a feature invocation.
///
/// Everything except [`CoachError::UnknownFeature`] is user-recoverable: the
/// message is shown as-is and the user re-triggers the feature manually.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("unknown feature: '{0}'")]
    UnknownFeature(String),

    #[error("enter an API key in settings before generating")]
    MissingCredential,

    #[error("question must not be empty")]
    EmptyQuery,

    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error(transparent)]
    Completion(#[from] LlmError),
}

impl CoachError {
    /// Follow-up suggestion shown under the error message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CoachError::MissingCredential => Some("Enter your Gemini API key in the settings panel"),
            CoachError::Completion(_) => Some("Check API key and try again"),
            _ => None,
        }
    }
}
